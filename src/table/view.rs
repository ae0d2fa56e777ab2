//! Rendered structure of the table
//!
//! [`TableView::project`] is a pure function of props and state. Front ends
//! (the ratatui panel, the plain-text printer) only draw what it returns.

use super::sort::SortDirection;
use super::state::{TableProps, TableState};
use unicode_width::UnicodeWidthStr;

/// One header cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: String,
    pub label: String,
    /// Whether activating this header emits a sort event
    pub sortable: bool,
    /// Present only on the active sort column
    pub direction: Option<SortDirection>,
}

impl HeaderCell {
    /// Label with the sort indicator appended
    pub fn display(&self) -> String {
        match self.direction {
            Some(direction) => format!("{} {}", self.label, direction.indicator()),
            None => self.label.clone(),
        }
    }
}

/// Previous/next controls, shown only when there is more than one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
    pub previous_disabled: bool,
    pub next_disabled: bool,
}

impl Pagination {
    pub fn indicator(&self) -> String {
        format!("Page {} of {}", self.current_page, self.total_pages)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub title: Option<String>,
    pub headers: Vec<HeaderCell>,
    /// Page slice; one string per column, in column order
    pub rows: Vec<Vec<String>>,
    pub pagination: Option<Pagination>,
}

impl TableView {
    pub fn project(props: &TableProps, state: &TableState) -> Self {
        let headers = props
            .columns
            .iter()
            .map(|column| HeaderCell {
                key: column.key.clone(),
                label: column.header.clone(),
                sortable: column.sortable,
                direction: state
                    .sort
                    .as_ref()
                    .filter(|s| s.key == column.key)
                    .map(|s| s.direction),
            })
            .collect();

        let rows = state
            .page_records(props)
            .iter()
            .map(|record| {
                props
                    .columns
                    .iter()
                    .map(|column| record.get(&column.key).to_string())
                    .collect()
            })
            .collect();

        let total_pages = props.total_pages();
        let pagination = (total_pages > 1).then(|| Pagination {
            current_page: state.current_page,
            total_pages,
            previous_disabled: state.current_page == 1,
            next_disabled: state.current_page == total_pages,
        });

        Self {
            title: props.title.clone(),
            headers,
            rows,
            pagination,
        }
    }

    /// Aligned plain-text grid for non-interactive output
    pub fn to_text(&self) -> String {
        let labels: Vec<String> = self.headers.iter().map(HeaderCell::display).collect();
        let mut widths: Vec<usize> = labels.iter().map(|l| l.width()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.width());
            }
        }

        let mut out = String::new();
        if let Some(title) = &self.title {
            out.push_str(title);
            out.push('\n');
        }

        out.push_str(&format_line(&labels, &widths));
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(&format_line(&rule, &widths));
        for row in &self.rows {
            out.push_str(&format_line(row, &widths));
        }

        if let Some(pagination) = &self.pagination {
            out.push_str(&pagination.indicator());
            out.push('\n');
        }
        out
    }

    /// Tab-separated header and rows, for pasting into spreadsheets
    pub fn to_tsv(&self) -> String {
        let mut out = self
            .headers
            .iter()
            .map(|h| h.label.as_str())
            .collect::<Vec<_>>()
            .join("\t");
        out.push('\n');
        for row in &self.rows {
            out.push_str(&row.join("\t"));
            out.push('\n');
        }
        out
    }
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.width());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    let mut line = padded.join("  ").trim_end().to_string();
    line.push('\n');
    line
}
