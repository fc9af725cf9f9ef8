//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{
    is_valid_role, is_valid_status, is_valid_team, AVATAR_BASE_URL, DEFAULT_ROLE, DEFAULT_STATUS,
    DEFAULT_TEAM,
};
use crate::error::{DomainError, DomainResult};

/// Store-assigned user identifier
pub type UserId = i64;

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier, assigned on creation
    pub id: UserId,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Role (`admin`, `editor`, `viewer`; storage accepts any text)
    pub role: String,
    /// Team name
    pub team: String,
    /// Account status (`active` or `inactive`)
    pub status: String,
    /// Avatar image URL derived from the email
    pub avatar: String,
    /// Creation timestamp, immutable after creation
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Lower-case the categorical fields in place.
    pub fn normalize_casing(&mut self) {
        self.role = self.role.to_lowercase();
        self.team = self.team.to_lowercase();
        self.status = self.status.to_lowercase();
    }
}

/// Derive an avatar URL for an email address.
///
/// The same email always yields the same URL; a blank email gets a random token.
pub fn avatar_url(email: &str) -> String {
    let email = email.trim();
    let token = if email.is_empty() {
        Uuid::new_v4().simple().to_string()
    } else {
        url::form_urlencoded::byte_serialize(email.as_bytes()).collect()
    };
    format!("{}?u={}", AVATAR_BASE_URL, token)
}

/// User creation data transfer object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewUser {
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Role, defaults to `viewer`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Team, defaults to `General`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    /// Status, defaults to `active`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl NewUser {
    /// Create a new user input with only the required fields
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Default::default()
        }
    }

    /// Build the stored entity, applying defaults for omitted fields.
    pub fn into_user(self, id: UserId, created_at: DateTime<Utc>) -> User {
        let avatar = avatar_url(&self.email);
        User {
            id,
            name: self.name,
            email: self.email,
            role: non_blank_or(self.role, DEFAULT_ROLE),
            team: non_blank_or(self.team, DEFAULT_TEAM),
            status: non_blank_or(self.status, DEFAULT_STATUS),
            avatar,
            created_at,
        }
    }
}

fn non_blank_or(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl TryFrom<UserPatch> for NewUser {
    type Error = DomainError;

    fn try_from(patch: UserPatch) -> DomainResult<Self> {
        let name = required(patch.name, "Name")?;
        let email = required(patch.email, "Email")?;
        Ok(Self {
            name,
            email,
            role: patch.role,
            team: patch.team,
            status: patch.status,
        })
    }
}

fn required(value: Option<String>, field: &str) -> DomainResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(DomainError::validation(format!("{} is required", field))),
    }
}

/// Partial user update (also the add/edit form payload)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl UserPatch {
    /// Check if no field is supplied
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.role.is_none()
            && self.team.is_none()
            && self.status.is_none()
    }

    /// Check the categorical fields against the values the form offers.
    ///
    /// Blank values are skipped (creation fills in defaults), and so are values
    /// equal to `current`'s, so legacy records stay editable.
    pub fn check_choices(&self, current: Option<&User>) -> DomainResult<()> {
        check_choice(
            "role",
            self.role.as_deref(),
            current.map(|u| u.role.as_str()),
            is_valid_role,
        )?;
        check_choice(
            "team",
            self.team.as_deref(),
            current.map(|u| u.team.as_str()),
            is_valid_team,
        )?;
        check_choice(
            "status",
            self.status.as_deref(),
            current.map(|u| u.status.as_str()),
            is_valid_status,
        )
    }

    /// Shallow-merge the supplied fields over an existing user.
    ///
    /// `id`, `avatar` and `created_at` are never touched.
    pub fn apply(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(role) = self.role {
            user.role = role;
        }
        if let Some(team) = self.team {
            user.team = team;
        }
        if let Some(status) = self.status {
            user.status = status;
        }
    }
}

fn check_choice(
    field: &str,
    value: Option<&str>,
    current: Option<&str>,
    is_valid: fn(&str) -> bool,
) -> DomainResult<()> {
    match value {
        Some(v) if !v.trim().is_empty() && Some(v) != current && !is_valid(v) => Err(
            DomainError::validation(format!("Invalid {}: {}", field, v)),
        ),
        _ => Ok(()),
    }
}

impl From<&User> for UserPatch {
    fn from(user: &User) -> Self {
        Self {
            name: Some(user.name.clone()),
            email: Some(user.email.clone()),
            role: Some(user.role.clone()),
            team: Some(user.team.clone()),
            status: Some(user.status.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_user() -> User {
        NewUser::new("John Doe", "john@example.com")
            .into_user(1, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
    }

    #[test]
    fn test_check_choices() {
        let patch = UserPatch {
            role: Some("editor".into()),
            team: Some("".into()),
            status: Some("inactive".into()),
            ..Default::default()
        };
        assert!(patch.check_choices(None).is_ok());

        let patch = UserPatch {
            role: Some("superuser".into()),
            ..Default::default()
        };
        let err = patch.check_choices(None).unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref m) if m == "Invalid role: superuser"));

        let patch = UserPatch {
            status: Some("archived".into()),
            ..Default::default()
        };
        assert!(patch.check_choices(None).is_err());
    }

    #[test]
    fn test_check_choices_keeps_current_values() {
        let mut user = sample_user();
        user.team = "engineering".to_string();

        let patch = UserPatch::from(&user);
        assert!(patch.check_choices(Some(&user)).is_ok());
        assert!(patch.check_choices(None).is_err());
    }

    #[test]
    fn test_into_user_applies_defaults() {
        let user = sample_user();
        assert_eq!(user.role, "viewer");
        assert_eq!(user.status, "active");
        assert_eq!(user.team, "General");
        assert_eq!(user.avatar, "https://i.pravatar.cc/150?u=john%40example.com");
    }

    #[test]
    fn test_into_user_keeps_supplied_fields() {
        let input = NewUser {
            role: Some("admin".into()),
            team: Some("sales".into()),
            status: Some("inactive".into()),
            ..NewUser::new("A", "a@example.com")
        };
        let user = input.into_user(7, Utc::now());
        assert_eq!(user.id, 7);
        assert_eq!(user.role, "admin");
        assert_eq!(user.team, "sales");
        assert_eq!(user.status, "inactive");
    }

    #[test]
    fn test_avatar_is_deterministic() {
        assert_eq!(avatar_url("x@example.com"), avatar_url("x@example.com"));
        assert_ne!(avatar_url("x@example.com"), avatar_url("y@example.com"));
    }

    #[test]
    fn test_avatar_blank_email_gets_token() {
        let a = avatar_url("  ");
        assert!(a.starts_with("https://i.pravatar.cc/150?u="));
        assert!(a.len() > "https://i.pravatar.cc/150?u=".len());
        assert_ne!(a, avatar_url(""));
    }

    #[test]
    fn test_patch_is_shallow_merge() {
        let mut user = sample_user();
        let before = user.clone();

        UserPatch {
            status: Some("inactive".into()),
            ..Default::default()
        }
        .apply(&mut user);

        assert_eq!(user.status, "inactive");
        assert_eq!(user.name, before.name);
        assert_eq!(user.email, before.email);
        assert_eq!(user.avatar, before.avatar);
        assert_eq!(user.created_at, before.created_at);
    }

    #[test]
    fn test_new_user_from_patch_requires_name_and_email() {
        let err = NewUser::try_from(UserPatch {
            email: Some("a@example.com".into()),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err, DomainError::validation("Name is required"));

        let err = NewUser::try_from(UserPatch {
            name: Some("A".into()),
            email: Some("   ".into()),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err, DomainError::validation("Email is required"));

        let ok = NewUser::try_from(UserPatch {
            name: Some("A".into()),
            email: Some("a@example.com".into()),
            role: Some("editor".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(ok.role.as_deref(), Some("editor"));
    }

    #[test]
    fn test_serde_uses_camel_case() {
        let json = serde_json::to_value(sample_user()).unwrap();
        assert_eq!(json["createdAt"], "2024-01-01T00:00:00Z");
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_patch_skips_missing_fields() {
        let json = serde_json::to_string(&UserPatch {
            team: Some("hr".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(json, r#"{"team":"hr"}"#);
    }

    #[test]
    fn test_normalize_casing() {
        let mut user = sample_user();
        user.role = "Admin".into();
        user.team = "MARKETING".into();
        user.status = "Active".into();
        user.normalize_casing();
        assert_eq!(user.role, "admin");
        assert_eq!(user.team, "marketing");
        assert_eq!(user.status, "active");
    }
}
