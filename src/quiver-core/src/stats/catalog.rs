//! Statistics for the leaf columns of an expression.

use std::collections::HashMap;

use super::ColumnStats;

/// Snapshots for leaf column references, keyed by column name.
///
/// A column without an entry has unknown statistics. Unknown is never the same
/// as narrow: consumers must fall back to their general behavior.
#[derive(Debug, Clone, Default)]
pub struct StatsCatalog {
    columns: HashMap<String, ColumnStats>,
}

impl StatsCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add statistics for a column (builder style).
    #[must_use]
    pub fn with_column(mut self, name: impl Into<String>, stats: ColumnStats) -> Self {
        self.insert(name, stats);
        self
    }

    /// Add or replace statistics for a column.
    pub fn insert(&mut self, name: impl Into<String>, stats: ColumnStats) {
        self.columns.insert(name.into(), stats);
    }

    /// Look up the statistics of a column.
    pub fn get(&self, name: &str) -> Option<&ColumnStats> {
        self.columns.get(name)
    }

    /// Number of columns with statistics.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the catalog holds no statistics at all.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
