use serde::Deserialize;

use crate::credentials::CredentialReport;
use crate::error::{FactIndexError, Result};

use super::env::{EnvLookup, read_env_u64, read_env_usize, read_non_empty_env};

pub(super) const ENV_APP_ID: &str = "FACTINDEX_SEARCH_APP_ID";
pub(super) const ENV_API_KEY: &str = "FACTINDEX_SEARCH_API_KEY";
const ENV_INDEX: &str = "FACTINDEX_SEARCH_INDEX";
const ENV_SUGGESTIONS_INDEX: &str = "FACTINDEX_SUGGESTIONS_INDEX";
const ENV_ENDPOINT: &str = "FACTINDEX_SEARCH_ENDPOINT";
const ENV_TIMEOUT_MS: &str = "FACTINDEX_SEARCH_TIMEOUT_MS";
const ENV_HITS_PER_PAGE: &str = "FACTINDEX_HITS_PER_PAGE";
const ENV_FACET_LIMIT: &str = "FACTINDEX_FACET_LIMIT";

pub const DEFAULT_INDEX_NAME: &str = "system-notes";
const DEFAULT_TIMEOUT_MS: u64 = 2000;
const DEFAULT_HITS_PER_PAGE: usize = 20;
const DEFAULT_FACET_LIMIT: usize = 50;

#[derive(Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub app_id: Option<String>,
    pub api_key: Option<String>,
    pub index_name: String,
    pub suggestions_index: String,
    /// Overrides the `https://<app id>-dsn.algolia.net` host.
    pub endpoint: Option<String>,
    pub timeout_ms: u64,
    pub hits_per_page: usize,
    pub facet_limit: usize,
}

impl std::fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfig")
            .field("app_id", &self.app_id)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("index_name", &self.index_name)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            app_id: None,
            api_key: None,
            index_name: DEFAULT_INDEX_NAME.to_string(),
            suggestions_index: suggestions_index_for(DEFAULT_INDEX_NAME),
            endpoint: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            hits_per_page: DEFAULT_HITS_PER_PAGE,
            facet_limit: DEFAULT_FACET_LIMIT,
        }
    }
}

/// `[search]` table of the optional config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct SearchFileSection {
    pub(super) app_id: Option<String>,
    pub(super) api_key: Option<String>,
    pub(super) index_name: Option<String>,
    pub(super) suggestions_index: Option<String>,
    pub(super) endpoint: Option<String>,
    pub(super) timeout_ms: Option<u64>,
    pub(super) hits_per_page: Option<usize>,
    pub(super) facet_limit: Option<usize>,
}

impl SearchConfig {
    pub(super) fn resolve(file: SearchFileSection, env: EnvLookup<'_>) -> Result<Self> {
        let defaults = Self::default();
        let index_name = read_non_empty_env(env, ENV_INDEX)
            .or(non_blank(file.index_name))
            .unwrap_or(defaults.index_name);
        let suggestions_index = read_non_empty_env(env, ENV_SUGGESTIONS_INDEX)
            .or(non_blank(file.suggestions_index))
            .unwrap_or_else(|| suggestions_index_for(&index_name));
        let endpoint = read_non_empty_env(env, ENV_ENDPOINT)
            .or(non_blank(file.endpoint))
            .map(|raw| normalize_endpoint(&raw))
            .transpose()?;

        let hits_per_page = read_env_usize(
            env,
            ENV_HITS_PER_PAGE,
            file.hits_per_page.unwrap_or(defaults.hits_per_page),
            1,
        );
        let facet_limit = read_env_usize(
            env,
            ENV_FACET_LIMIT,
            file.facet_limit.unwrap_or(defaults.facet_limit),
            1,
        );
        if hits_per_page == 0 || facet_limit == 0 {
            return Err(FactIndexError::Config(
                "hits_per_page and facet_limit must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            app_id: read_non_empty_env(env, ENV_APP_ID).or(non_blank(file.app_id)),
            api_key: read_non_empty_env(env, ENV_API_KEY).or(non_blank(file.api_key)),
            index_name,
            suggestions_index,
            endpoint,
            timeout_ms: read_env_u64(env, ENV_TIMEOUT_MS)
                .or(file.timeout_ms)
                .filter(|ms| *ms > 0)
                .unwrap_or(defaults.timeout_ms),
            hits_per_page,
            facet_limit,
        })
    }

    #[must_use]
    pub fn credential_report(&self) -> CredentialReport {
        CredentialReport::check(self.app_id.as_deref(), self.api_key.as_deref())
    }

    /// Base URL for REST calls, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> Option<String> {
        if let Some(endpoint) = &self.endpoint {
            return Some(endpoint.clone());
        }
        self.app_id
            .as_ref()
            .map(|app_id| format!("https://{}-dsn.algolia.net", app_id.to_ascii_lowercase()))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

fn suggestions_index_for(index_name: &str) -> String {
    format!("{index_name}_query_suggestions")
}

fn normalize_endpoint(raw: &str) -> Result<String> {
    let parsed = reqwest::Url::parse(raw)
        .map_err(|err| FactIndexError::Config(format!("invalid {ENV_ENDPOINT}: {err}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(FactIndexError::Config(format!(
            "invalid {ENV_ENDPOINT}: unsupported scheme {}",
            parsed.scheme()
        )));
    }
    Ok(raw.trim_end_matches('/').to_string())
}
