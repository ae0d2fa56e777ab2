//! Table state and its transition function
//!
//! `TableState::apply` is the only way state changes: the host feeds it
//! events (header activation, page navigation) and re-projects the view.

use super::column::Columns;
use super::sort::{sorted_records, SortDirection, SortDirective};
use super::value::Record;
use super::TableError;
use std::borrow::Cow;

/// Rows per page when the caller does not choose
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Caller-supplied inputs, immutable for one render cycle
#[derive(Debug, Clone)]
pub struct TableProps {
    pub data: Vec<Record>,
    pub columns: Columns,
    page_size: usize,
    pub title: Option<String>,
}

impl TableProps {
    pub fn new(columns: Columns) -> Self {
        Self {
            data: Vec::new(),
            columns,
            page_size: DEFAULT_PAGE_SIZE,
            title: None,
        }
    }

    pub fn with_data(mut self, data: Vec<Record>) -> Self {
        self.data = data;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set rows per page; zero is rejected
    pub fn with_page_size(mut self, page_size: usize) -> Result<Self, TableError> {
        if page_size == 0 {
            return Err(TableError::ZeroPageSize);
        }
        self.page_size = page_size;
        Ok(self)
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// `ceil(len / page_size)`; zero for an empty dataset
    pub fn total_pages(&self) -> usize {
        self.data.len().div_ceil(self.page_size)
    }
}

/// Input events the table reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    /// Header activation for the column with this key
    Sort(String),
    GoToPage(usize),
    NextPage,
    PreviousPage,
    FirstPage,
    LastPage,
}

/// Transient UI state owned by the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    pub sort: Option<SortDirective>,
    /// 1-based
    pub current_page: usize,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            sort: None,
            current_page: 1,
        }
    }
}

impl TableState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pure transition: the state after `event` under `props`
    pub fn apply(&self, event: &TableEvent, props: &TableProps) -> TableState {
        match event {
            TableEvent::Sort(key) => self.sorted_by(key, props),
            TableEvent::GoToPage(page) => self.at_page(*page, props),
            TableEvent::NextPage => self.at_page(self.current_page.saturating_add(1), props),
            TableEvent::PreviousPage => self.at_page(self.current_page.saturating_sub(1), props),
            TableEvent::FirstPage => self.at_page(1, props),
            TableEvent::LastPage => self.at_page(props.total_pages(), props),
        }
    }

    /// In-place convenience over [`TableState::apply`]
    pub fn update(&mut self, event: &TableEvent, props: &TableProps) {
        *self = self.apply(event, props);
    }

    /// none → ascending → descending → none; another column restarts at ascending
    fn sorted_by(&self, key: &str, props: &TableProps) -> TableState {
        if props.columns.sortable(key).is_none() {
            return self.clone();
        }

        let sort = match &self.sort {
            Some(current) if current.key == key => match current.direction {
                SortDirection::Ascending => Some(SortDirective::descending(key)),
                SortDirection::Descending => None,
            },
            _ => Some(SortDirective::ascending(key)),
        };

        tracing::debug!(key, ?sort, "sort directive changed");

        TableState {
            sort,
            current_page: self.current_page,
        }
    }

    fn at_page(&self, page: usize, props: &TableProps) -> TableState {
        let total = props.total_pages();
        let current_page = if total == 0 { 1 } else { page.clamp(1, total) };

        TableState {
            sort: self.sort.clone(),
            current_page,
        }
    }

    /// All records in display order
    pub fn sorted_data<'a>(&self, props: &'a TableProps) -> Cow<'a, [Record]> {
        sorted_records(&props.data, self.sort.as_ref())
    }

    /// Offset of the first row on the current page
    pub fn start_index(&self, props: &TableProps) -> usize {
        self.current_page.saturating_sub(1).saturating_mul(props.page_size())
    }

    /// Records shown on the current page; empty when the page is past the end
    pub fn page_records(&self, props: &TableProps) -> Vec<Record> {
        let sorted = self.sorted_data(props);
        let start = self.start_index(props).min(sorted.len());
        let end = start.saturating_add(props.page_size()).min(sorted.len());
        sorted[start..end].to_vec()
    }
}
