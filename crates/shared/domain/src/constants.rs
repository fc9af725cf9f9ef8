//! Domain-level constants.
//!
//! These constants define the categorical vocabularies the UI offers and the
//! defaults applied when a client omits a field.

// =============================================================================
// User Roles
// =============================================================================

/// Administrator role
pub const ROLE_ADMIN: &str = "admin";

/// Editor role
pub const ROLE_EDITOR: &str = "editor";

/// Read-only role, assigned to new users by default
pub const ROLE_VIEWER: &str = "viewer";

/// All role values offered by the UI
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_EDITOR, ROLE_VIEWER];

/// Check if a role value is one the UI offers
pub fn is_valid_role(role: &str) -> bool {
    VALID_ROLES.contains(&role)
}

// =============================================================================
// Teams
// =============================================================================

/// Team values offered by the UI (storage accepts any text)
pub const VALID_TEAMS: &[&str] = &[
    "design",
    "development",
    "finance",
    "hr",
    "management",
    "marketing",
    "sales",
];

/// Check if a team value is one the UI offers
pub fn is_valid_team(team: &str) -> bool {
    VALID_TEAMS.contains(&team)
}

// =============================================================================
// Statuses
// =============================================================================

/// Active account status, assigned to new users by default
pub const STATUS_ACTIVE: &str = "active";

/// Inactive account status
pub const STATUS_INACTIVE: &str = "inactive";

/// All status values
pub const VALID_STATUSES: &[&str] = &[STATUS_ACTIVE, STATUS_INACTIVE];

/// Check if a status value is valid
pub fn is_valid_status(status: &str) -> bool {
    VALID_STATUSES.contains(&status)
}

// =============================================================================
// Creation Defaults
// =============================================================================

/// Role applied when a create request omits it
pub const DEFAULT_ROLE: &str = ROLE_VIEWER;

/// Status applied when a create request omits it
pub const DEFAULT_STATUS: &str = STATUS_ACTIVE;

/// Team applied when a create request omits it
pub const DEFAULT_TEAM: &str = "General";

/// Avatar service base URL
pub const AVATAR_BASE_URL: &str = "https://i.pravatar.cc/150";

// =============================================================================
// Filter Descriptors
// =============================================================================

/// A selectable value of a categorical column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOptionValue {
    pub label: &'static str,
    pub value: &'static str,
}

/// A categorical column the UI filters on and offers as a form select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOption {
    pub column_key: &'static str,
    pub label: &'static str,
    pub options: &'static [FilterOptionValue],
}

const fn option(label: &'static str, value: &'static str) -> FilterOptionValue {
    FilterOptionValue { label, value }
}

/// Filter descriptors for role, team and status, in display order
pub const FILTER_OPTIONS: &[FilterOption] = &[
    FilterOption {
        column_key: "role",
        label: "Role",
        options: &[
            option("Admin", ROLE_ADMIN),
            option("Editor", ROLE_EDITOR),
            option("Viewer", ROLE_VIEWER),
        ],
    },
    FilterOption {
        column_key: "team",
        label: "Team",
        options: &[
            option("Design", "design"),
            option("Development", "development"),
            option("Finance", "finance"),
            option("HR", "hr"),
            option("Management", "management"),
            option("Marketing", "marketing"),
            option("Sales", "sales"),
        ],
    },
    FilterOption {
        column_key: "status",
        label: "Status",
        options: &[
            option("Active", STATUS_ACTIVE),
            option("Inactive", STATUS_INACTIVE),
        ],
    },
];

/// Look up the filter descriptor for a column key
pub fn filter_option(column_key: &str) -> Option<&'static FilterOption> {
    FILTER_OPTIONS.iter().find(|f| f.column_key == column_key)
}
