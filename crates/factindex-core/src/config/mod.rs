use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{FactIndexError, Result};

mod env;
mod search;

pub use search::{DEFAULT_INDEX_NAME, SearchConfig};

use self::env::{EnvLookup, process_env, read_non_empty_env};
use self::search::SearchFileSection;

const ENV_BASE_PATH: &str = "FACTINDEX_BASE_PATH";
const DEFAULT_BASE_PATH: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub search: SearchConfig,
    /// Path of the search page; shareable URLs are built against it.
    pub base_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            base_path: DEFAULT_BASE_PATH.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    search: SearchFileSection,
    #[serde(default)]
    routing: RoutingFileSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RoutingFileSection {
    base_path: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::resolve(ConfigFile::default(), &process_env)
    }

    /// Reads the optional TOML file, then lets environment variables win.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => parse_config_file(&fs::read_to_string(path)?)?,
            None => ConfigFile::default(),
        };
        Self::resolve(file, &process_env)
    }

    fn resolve(file: ConfigFile, env: EnvLookup<'_>) -> Result<Self> {
        let base_path = read_non_empty_env(env, ENV_BASE_PATH)
            .or(file.routing.base_path)
            .unwrap_or_else(|| DEFAULT_BASE_PATH.to_string());
        Ok(Self {
            search: SearchConfig::resolve(file.search, env)?,
            base_path: normalize_base_path(&base_path)?,
        })
    }
}

fn parse_config_file(raw: &str) -> Result<ConfigFile> {
    Ok(toml::from_str(raw)?)
}

fn normalize_base_path(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if !trimmed.starts_with('/') || trimmed.contains(['?', '#']) {
        return Err(FactIndexError::Config(format!(
            "invalid {ENV_BASE_PATH}: {trimmed} (expected an absolute path without query)"
        )));
    }
    Ok(trimmed.to_string())
}
