//! Local validation of hosted-search credentials.
//!
//! Obviously fake credentials (`test_app_id`, empty keys in CI) never reach
//! client construction.

use serde::Serialize;

/// Hosted-search application ids are always this many ASCII alphanumerics.
pub const APP_ID_LEN: usize = 10;

/// Shortest search-only API key the hosted service issues.
pub const MIN_API_KEY_LEN: usize = 20;

#[must_use]
pub fn is_valid_app_id(app_id: &str) -> bool {
    app_id.len() == APP_ID_LEN && app_id.bytes().all(|b| b.is_ascii_alphanumeric())
}

#[must_use]
pub fn is_valid_api_key(api_key: &str) -> bool {
    api_key.chars().count() >= MIN_API_KEY_LEN
}

#[must_use]
pub fn has_valid_credentials(app_id: &str, api_key: &str) -> bool {
    is_valid_app_id(app_id) && is_valid_api_key(api_key)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CredentialReport {
    pub app_id_valid: bool,
    pub api_key_valid: bool,
    pub enabled: bool,
}

impl CredentialReport {
    #[must_use]
    pub fn check(app_id: Option<&str>, api_key: Option<&str>) -> Self {
        let app_id_valid = app_id.is_some_and(is_valid_app_id);
        let api_key_valid = api_key.is_some_and(is_valid_api_key);
        Self {
            app_id_valid,
            api_key_valid,
            enabled: app_id_valid && api_key_valid,
        }
    }
}
