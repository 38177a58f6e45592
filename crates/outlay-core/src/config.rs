//! Sync configuration
//!
//! An explicit config object passed to the components that need it, rather
//! than ambient global state. The remote store keys every document by a
//! single fixed user identifier; multi-user support is out of scope.

/// Environment variable for the remote document store base URL
pub const SYNC_URL_ENV: &str = "OUTLAY_SYNC_URL";

/// Environment variable for the user identifier sent with each document
pub const USER_ID_ENV: &str = "OUTLAY_USER_ID";

/// The user id used when none is configured
pub const DEFAULT_USER_ID: &str = "default_user";

#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Remote document store base URL. None disables remote sync entirely.
    pub base_url: Option<String>,
    /// Fixed single-user identifier carried in every remote document.
    pub user_id: String,
}

impl SyncConfig {
    pub fn new(base_url: Option<String>, user_id: impl Into<String>) -> Self {
        Self {
            base_url,
            user_id: user_id.into(),
        }
    }

    /// Read configuration from the environment
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var(SYNC_URL_ENV).ok(),
            user_id: std::env::var(USER_ID_ENV).unwrap_or_else(|_| DEFAULT_USER_ID.to_string()),
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            user_id: DEFAULT_USER_ID.to_string(),
        }
    }
}
