//! Sortable, paginated table component
//!
//! The component is split into plain data (`TableProps`), transient UI state
//! (`TableState`), a pure transition (`TableState::apply`) and a pure
//! projection (`TableView::project`). Nothing here knows about terminals or
//! HTTP; hosts feed events in and draw the projected view.

mod column;
mod sort;
mod state;
mod value;
mod view;

use std::fmt;

pub use column::{Column, Columns};
pub use sort::{SortDirection, SortDirective};
pub use state::{TableEvent, TableProps, TableState, DEFAULT_PAGE_SIZE};
pub use value::{CellValue, Record};
pub use view::{HeaderCell, Pagination, TableView};

/// Invalid table configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    EmptyColumnKey { index: usize },
    DuplicateColumnKey(String),
    ZeroPageSize,
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyColumnKey { index } => write!(f, "column {} has an empty key", index),
            Self::DuplicateColumnKey(key) => write!(f, "duplicate column key '{}'", key),
            Self::ZeroPageSize => write!(f, "page size must be at least 1"),
        }
    }
}

impl std::error::Error for TableError {}
