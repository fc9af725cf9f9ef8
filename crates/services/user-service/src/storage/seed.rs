//! Default user list loaded from a JSON seed file.

use std::fs;
use std::path::Path;

use chrono::{TimeZone, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

use common::{AppError, AppResult};
use domain::{avatar_url, User};

/// Seed file layout: `{ "users": [ ... ] }`
#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    users: Vec<User>,
}

/// SeedLoader reads the default users the store is initialized with.
pub struct SeedLoader;

impl SeedLoader {
    /// Load the seed file, falling back to the built-in users on any failure.
    pub fn load(path: &Path) -> Vec<User> {
        match Self::try_load(path) {
            Ok(users) => {
                debug!("SeedLoader: loaded {} users from {:?}", users.len(), path);
                users
            }
            Err(e) => {
                warn!("SeedLoader: cannot read {:?} ({}), using built-in users", path, e);
                Self::builtin()
            }
        }
    }

    /// Load the seed file, reporting failures.
    pub fn try_load(path: &Path) -> AppResult<Vec<User>> {
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::internal(format!("Seed file error: {}", e)))?;
        let seed: SeedFile = serde_json::from_str(&content)?;
        Ok(seed.users)
    }

    /// Users served when no seed file is readable.
    pub fn builtin() -> Vec<User> {
        vec![
            builtin_user(1, "John Doe", "john@example.com", "admin", "engineering", 1),
            builtin_user(2, "Jane Smith", "jane@example.com", "user", "marketing", 2),
        ]
    }
}

fn builtin_user(id: i64, name: &str, email: &str, role: &str, team: &str, day: u32) -> User {
    User {
        id,
        name: name.to_string(),
        email: email.to_string(),
        role: role.to_string(),
        team: team.to_string(),
        status: "active".to_string(),
        avatar: avatar_url(email),
        created_at: Utc
            .with_ymd_and_hms(2024, 1, day, 0, 0, 0)
            .single()
            .unwrap_or_else(Utc::now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_users() {
        let users = SeedLoader::builtin();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].name, "John Doe");
        assert_eq!(users[1].name, "Jane Smith");
        assert!(users.iter().all(|u| u.status == "active"));
    }

    #[test]
    fn test_load_seed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let seed = serde_json::json!({
            "users": [{
                "id": 5,
                "name": "Bob",
                "email": "bob@example.com",
                "role": "viewer",
                "team": "finance",
                "status": "inactive",
                "avatar": "a",
                "createdAt": "2024-01-03T00:00:00Z"
            }]
        });
        write!(file, "{}", seed).unwrap();

        let users = SeedLoader::load(file.path());
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, 5);
        assert_eq!(users[0].status, "inactive");
    }

    #[test]
    fn test_missing_file_falls_back() {
        let users = SeedLoader::load(Path::new("/nonexistent/db.json"));
        assert_eq!(users, SeedLoader::builtin());
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(SeedLoader::try_load(file.path()).is_err());
        assert_eq!(SeedLoader::load(file.path()), SeedLoader::builtin());
    }

    #[test]
    fn test_file_without_users_is_empty() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{}}").unwrap();

        assert!(SeedLoader::load(file.path()).is_empty());
    }
}
