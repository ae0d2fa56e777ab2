//! Column descriptors

use super::TableError;
use std::collections::HashSet;

/// Describes one rendered column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Record field this column reads
    pub key: String,
    /// Display label
    pub header: String,
    pub sortable: bool,
}

impl Column {
    /// A non-sortable column
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            sortable: false,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }
}

/// Validated, ordered set of column descriptors
///
/// Keys are non-empty and unique. Order is render order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Columns(Vec<Column>);

impl Columns {
    pub fn new(columns: Vec<Column>) -> Result<Self, TableError> {
        let mut seen = HashSet::with_capacity(columns.len());
        for (index, column) in columns.iter().enumerate() {
            if column.key.is_empty() {
                return Err(TableError::EmptyColumnKey { index });
            }
            if !seen.insert(column.key.as_str()) {
                return Err(TableError::DuplicateColumnKey(column.key.clone()));
            }
        }
        Ok(Self(columns))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Column> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, index: usize) -> Option<&Column> {
        self.0.get(index)
    }

    /// Sortable descriptor for `key`, if any
    pub fn sortable(&self, key: &str) -> Option<&Column> {
        self.0.iter().find(|c| c.sortable && c.key == key)
    }
}

impl<'a> IntoIterator for &'a Columns {
    type Item = &'a Column;
    type IntoIter = std::slice::Iter<'a, Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
