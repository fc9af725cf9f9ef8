//! Sorting state: a stack of column comparators.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use domain::User;

use super::columns::Column;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("asc"),
            SortDirection::Desc => f.write_str("desc"),
        }
    }
}

/// One entry of the sort stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub column: Column,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn new(column: Column, direction: SortDirection) -> Self {
        Self { column, direction }
    }

    fn compare(&self, a: &User, b: &User) -> Ordering {
        let ordering = self.column.compare(a, b);
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Parses `column` or `column:asc|desc`.
impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (column, direction) = match s.split_once(':') {
            Some((column, direction)) => (column, Some(direction)),
            None => (s, None),
        };

        let direction = match direction.map(|d| d.trim().to_lowercase()).as_deref() {
            None | Some("asc") => SortDirection::Asc,
            Some("desc") => SortDirection::Desc,
            Some(other) => return Err(format!("Unknown sort direction: {}", other)),
        };

        Ok(Self::new(column.parse()?, direction))
    }
}

/// Sort stack, highest priority first.
///
/// Each column cycles unsorted, ascending, descending, unsorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sorting {
    keys: Vec<SortKey>,
}

impl Sorting {
    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Current direction of a column, if it is sorted.
    pub fn direction(&self, column: Column) -> Option<SortDirection> {
        self.keys
            .iter()
            .find(|key| key.column == column)
            .map(|key| key.direction)
    }

    /// Header click: advance the column and make it the only sort.
    pub fn toggle(&mut self, column: Column) {
        self.keys = match next_direction(self.direction(column)) {
            Some(direction) => vec![SortKey::new(column, direction)],
            None => Vec::new(),
        };
    }

    /// Shift-click: advance the column in place, keeping the rest of the stack.
    pub fn toggle_multi(&mut self, column: Column) {
        match self.keys.iter().position(|key| key.column == column) {
            Some(index) => match next_direction(Some(self.keys[index].direction)) {
                Some(direction) => self.keys[index].direction = direction,
                None => {
                    self.keys.remove(index);
                }
            },
            None => self.keys.push(SortKey::new(column, SortDirection::Asc)),
        }
    }

    /// Sort by exactly this column and direction.
    pub fn set(&mut self, column: Column, direction: SortDirection) {
        self.keys = vec![SortKey::new(column, direction)];
    }

    /// Replace the whole stack.
    pub fn set_keys(&mut self, keys: Vec<SortKey>) {
        self.keys.clear();
        for key in keys {
            if self.direction(key.column).is_none() {
                self.keys.push(key);
            }
        }
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Order rows by the stack. The sort is stable, so rows that compare
    /// equal keep their incoming order.
    pub fn apply(&self, rows: &mut [&User]) {
        if self.keys.is_empty() {
            return;
        }
        rows.sort_by(|a, b| {
            self.keys
                .iter()
                .map(|key| key.compare(a, b))
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        });
    }
}

fn next_direction(current: Option<SortDirection>) -> Option<SortDirection> {
    match current {
        None => Some(SortDirection::Asc),
        Some(SortDirection::Asc) => Some(SortDirection::Desc),
        Some(SortDirection::Desc) => None,
    }
}
