//! Row filtering: one global search string and per-column exact matches.

use std::collections::BTreeMap;

use domain::User;

use super::columns::{Column, FilterColumn};

/// Columns searched by the global filter.
pub const GLOBAL_FILTER_COLUMNS: [Column; 5] = [
    Column::Name,
    Column::Email,
    Column::Role,
    Column::Team,
    Column::Status,
];

/// Case-insensitive substring match over the searchable columns.
///
/// `needle` must already be lower-cased; an empty needle matches every row.
pub fn matches_global(user: &User, needle: &str) -> bool {
    needle.is_empty()
        || GLOBAL_FILTER_COLUMNS
            .iter()
            .any(|column| column.text(user).to_lowercase().contains(needle))
}

/// At most one exact-match value per filterable column, combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnFilters {
    values: BTreeMap<FilterColumn, String>,
}

impl ColumnFilters {
    /// Set the filter for a column; an empty value clears it.
    ///
    /// Returns whether anything changed.
    pub fn set(&mut self, column: FilterColumn, value: impl Into<String>) -> bool {
        let value = value.into();
        if value.is_empty() {
            return self.clear(column);
        }
        self.values.insert(column, value.clone()) != Some(value)
    }

    pub fn clear(&mut self, column: FilterColumn) -> bool {
        self.values.remove(&column).is_some()
    }

    /// Drop every column filter.
    pub fn reset(&mut self) -> bool {
        let changed = !self.values.is_empty();
        self.values.clear();
        changed
    }

    pub fn get(&self, column: FilterColumn) -> Option<&str> {
        self.values.get(&column).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilterColumn, &str)> {
        self.values.iter().map(|(column, value)| (*column, value.as_str()))
    }

    /// Check a row against every active filter.
    pub fn matches(&self, user: &User) -> bool {
        self.iter().all(|(column, value)| column.value(user) == value)
    }

    /// Check a row against every active filter except `skip`.
    pub fn matches_except(&self, user: &User, skip: FilterColumn) -> bool {
        self.iter()
            .filter(|(column, _)| *column != skip)
            .all(|(column, value)| column.value(user) == value)
    }
}
