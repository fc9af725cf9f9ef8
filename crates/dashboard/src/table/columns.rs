//! Column definitions for the user table.
//!
//! Columns are stateless: they only know how to read and display a field.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use domain::{filter_option, FilterOption, User};

/// Data columns of the user table, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Name,
    Email,
    Role,
    Team,
    Status,
    CreatedAt,
}

impl Column {
    /// Every column, in display order
    pub const ALL: [Column; 6] = [
        Column::Name,
        Column::Email,
        Column::Role,
        Column::Team,
        Column::Status,
        Column::CreatedAt,
    ];

    /// Stable key matching the wire field name
    pub fn key(self) -> &'static str {
        match self {
            Column::Name => "name",
            Column::Email => "email",
            Column::Role => "role",
            Column::Team => "team",
            Column::Status => "status",
            Column::CreatedAt => "createdAt",
        }
    }

    /// Header title
    pub fn title(self) -> &'static str {
        match self {
            Column::Name => "Name",
            Column::Email => "Email",
            Column::Role => "Role",
            Column::Team => "Team",
            Column::Status => "Status",
            Column::CreatedAt => "Created",
        }
    }

    /// Raw text value of this column for a user.
    pub fn text(self, user: &User) -> &str {
        match self {
            Column::Name => &user.name,
            Column::Email => &user.email,
            Column::Role => &user.role,
            Column::Team => &user.team,
            Column::Status => &user.status,
            Column::CreatedAt => "",
        }
    }

    /// Cell text as shown in the table.
    pub fn display(self, user: &User) -> String {
        match self {
            Column::Role | Column::Team | Column::Status => capitalize(self.text(user)),
            Column::CreatedAt => user.created_at.format("%Y-%m-%d").to_string(),
            _ => self.text(user).to_string(),
        }
    }

    /// Ascending order of two users on this column.
    ///
    /// Text columns compare case-insensitively; `CreatedAt` by timestamp.
    pub fn compare(self, a: &User, b: &User) -> Ordering {
        match self {
            Column::CreatedAt => a.created_at.cmp(&b.created_at),
            _ => self
                .text(a)
                .to_lowercase()
                .cmp(&self.text(b).to_lowercase()),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Column {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', '-'], "");
        match normalized.as_str() {
            "name" => Ok(Column::Name),
            "email" => Ok(Column::Email),
            "role" => Ok(Column::Role),
            "team" => Ok(Column::Team),
            "status" => Ok(Column::Status),
            "createdat" | "created" => Ok(Column::CreatedAt),
            _ => Err(format!("Unknown column: {}", s)),
        }
    }
}

/// Columns that take an exact-match filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterColumn {
    Role,
    Team,
    Status,
}

impl FilterColumn {
    /// Every filterable column
    pub const ALL: [FilterColumn; 3] =
        [FilterColumn::Role, FilterColumn::Team, FilterColumn::Status];

    /// The table column this filter applies to
    pub fn column(self) -> Column {
        match self {
            FilterColumn::Role => Column::Role,
            FilterColumn::Team => Column::Team,
            FilterColumn::Status => Column::Status,
        }
    }

    pub fn value(self, user: &User) -> &str {
        self.column().text(user)
    }

    /// Toolbar options offered for this filter
    pub fn options(self) -> Option<&'static FilterOption> {
        filter_option(self.column().key())
    }
}

impl fmt::Display for FilterColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.column(), f)
    }
}

impl FromStr for FilterColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<Column>()? {
            Column::Role => Ok(FilterColumn::Role),
            Column::Team => Ok(FilterColumn::Team),
            Column::Status => Ok(FilterColumn::Status),
            other => Err(format!("Column {} cannot be filtered", other)),
        }
    }
}

/// Upper-case the first character.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
