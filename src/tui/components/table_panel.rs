// Table panel component
//
// Renders the projected page: header with sort indicators, the page rows,
// and a pagination footer whose previous/next controls dim at the ends.

use crate::table::{HeaderCell, Pagination, TableView};
use crate::tui::app::App;
use crate::tui::theme::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let view = app.view();
    let theme = &app.theme;

    let title = view.title.clone().unwrap_or_else(|| app.symbol.clone());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [table_area, footer_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

    if view.rows.is_empty() {
        let message = if app.loading {
            format!("{} Loading {}...", app.spinner_char(), app.symbol)
        } else {
            "No rows".to_string()
        };
        let empty = Paragraph::new(message)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.control_disabled));
        f.render_widget(empty, table_area);
    } else {
        f.render_widget(build_table(&view, app.selected_key(), theme), table_area);
    }

    f.render_widget(footer(&view, app.props.data.len(), theme), footer_area);
}

fn build_table<'a>(view: &'a TableView, selected_key: Option<&str>, theme: &Theme) -> Table<'a> {
    let widths = column_widths(view);
    let selected: Vec<bool> = view
        .headers
        .iter()
        .map(|h| Some(h.key.as_str()) == selected_key)
        .collect();
    let numeric: Vec<bool> = (0..view.headers.len())
        .map(|i| view.rows.iter().all(|row| is_numeric(&row[i])))
        .collect();

    let header = Row::new(view.headers.iter().enumerate().map(|(i, cell)| {
        let text = Line::from(cell.display());
        let text = if numeric[i] { text.right_aligned() } else { text };
        Cell::from(text).style(header_style(cell, selected[i], theme))
    }));

    let rows = view.rows.iter().enumerate().map(|(r, row)| {
        let cells = row.iter().enumerate().map(|(i, value)| {
            let text = Line::from(value.as_str());
            let text = if numeric[i] { text.right_aligned() } else { text };
            let mut style = Style::default();
            if selected[i] {
                style = style.bg(theme.selected_column);
            }
            Cell::from(text).style(style)
        });
        let row_style = if r % 2 == 1 {
            Style::default().fg(theme.row_alt)
        } else {
            Style::default()
        };
        Row::new(cells).style(row_style)
    });

    Table::new(rows, widths)
        .header(header.bottom_margin(1))
        .column_spacing(2)
}

fn header_style(cell: &HeaderCell, selected: bool, theme: &Theme) -> Style {
    let mut style = Style::default().add_modifier(Modifier::BOLD);
    style = if cell.direction.is_some() {
        style.fg(theme.header_sorted)
    } else {
        style.fg(theme.header)
    };
    if !cell.sortable {
        style = style.add_modifier(Modifier::DIM);
    }
    if selected {
        style = style.bg(theme.selected_column);
    }
    style
}

fn column_widths(view: &TableView) -> Vec<Constraint> {
    view.headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let widest = view
                .rows
                .iter()
                .map(|row| row[i].width())
                .chain(std::iter::once(header.display().width()))
                .max()
                .unwrap_or(0);
            Constraint::Length(u16::try_from(widest).unwrap_or(u16::MAX))
        })
        .collect()
}

fn is_numeric(text: &str) -> bool {
    text.is_empty() || text.parse::<f64>().is_ok()
}

fn footer<'a>(view: &TableView, total_rows: usize, theme: &Theme) -> Paragraph<'a> {
    let line = match &view.pagination {
        Some(pagination) => pagination_line(pagination, total_rows, theme),
        None => Line::from(Span::styled(
            format!("{} rows", total_rows),
            Style::default().fg(theme.control_disabled),
        )),
    };
    Paragraph::new(line).alignment(Alignment::Center)
}

fn pagination_line<'a>(pagination: &Pagination, total_rows: usize, theme: &Theme) -> Line<'a> {
    let control = |label: &'static str, disabled: bool| {
        let color = if disabled {
            theme.control_disabled
        } else {
            theme.control
        };
        Span::styled(label, Style::default().fg(color))
    };

    Line::from(vec![
        control("◀ prev (p)", pagination.previous_disabled),
        Span::raw(format!(
            "   {} · {} rows   ",
            pagination.indicator(),
            total_rows
        )),
        control("next (n) ▶", pagination.next_disabled),
    ])
}
