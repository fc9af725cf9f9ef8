//! Dashboard configuration.

use std::env;

use crate::table::DEFAULT_PAGE_SIZE;

/// Default user API root
pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";

/// Dashboard configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// User API root, without the `/users` suffix
    pub api_url: String,
    /// Rows per table page
    pub page_size: usize,
}

impl DashboardConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            api_url: env::var("USERS_API_URL")
                .ok()
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            page_size: env::var("DASHBOARD_PAGE_SIZE")
                .ok()
                .and_then(|p| p.parse().ok())
                .filter(|p| *p > 0)
                .unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
