//! Application configuration for PersonScope.
//!
//! User config lives at `~/.personscope/personscope.toml`.
//! Credentials are never stored in the file, only the names of the
//! environment variables that hold them. A missing credential is not an
//! error: the affected provider degrades to its unconfigured path.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PersonScopeError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "personscope.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".personscope";

// ---------------------------------------------------------------------------
// Config structs (matching personscope.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Legal-records provider settings.
    #[serde(default)]
    pub legal: LegalConfig,

    /// Web search provider settings.
    #[serde(default)]
    pub search: SearchConfig,
}

/// `[legal]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegalConfig {
    /// API root of the legal-records provider.
    #[serde(default = "default_legal_base_url")]
    pub base_url: String,

    /// Name of the env var holding the bearer token.
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// Per-request timeout.
    #[serde(default = "default_legal_timeout")]
    pub timeout_secs: u64,
}

impl Default for LegalConfig {
    fn default() -> Self {
        Self {
            base_url: default_legal_base_url(),
            token_env: default_token_env(),
            timeout_secs: default_legal_timeout(),
        }
    }
}

fn default_legal_base_url() -> String {
    "https://api.escavador.com/api/v2".into()
}
fn default_token_env() -> String {
    "ESCAVADOR_API_TOKEN".into()
}
fn default_legal_timeout() -> u64 {
    30
}

/// `[search]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Custom search endpoint.
    #[serde(default = "default_search_base_url")]
    pub base_url: String,

    /// Name of the env var holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Name of the env var holding the search engine id.
    #[serde(default = "default_cx_env")]
    pub cx_env: String,

    /// Per-request timeout.
    #[serde(default = "default_search_timeout")]
    pub timeout_secs: u64,

    /// Return flagged placeholder hits when no key/cx is configured.
    #[serde(default)]
    pub simulate_when_unconfigured: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: default_search_base_url(),
            api_key_env: default_api_key_env(),
            cx_env: default_cx_env(),
            timeout_secs: default_search_timeout(),
            simulate_when_unconfigured: false,
        }
    }
}

fn default_search_base_url() -> String {
    "https://www.googleapis.com/customsearch/v1".into()
}
fn default_api_key_env() -> String {
    "GOOGLE_SEARCH_API_KEY".into()
}
fn default_cx_env() -> String {
    "GOOGLE_SEARCH_CX".into()
}
fn default_search_timeout() -> u64 {
    15
}

// ---------------------------------------------------------------------------
// Credentials (resolved from the environment at runtime)
// ---------------------------------------------------------------------------

/// Bearer token for the legal-records provider.
#[derive(Clone)]
pub struct LegalCredentials {
    pub token: String,
}

impl std::fmt::Debug for LegalCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LegalCredentials")
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Key + engine id pair for the search provider.
#[derive(Clone)]
pub struct SearchCredentials {
    pub api_key: String,
    pub cx: String,
}

impl std::fmt::Debug for SearchCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchCredentials")
            .field("api_key", &"<redacted>")
            .field("cx", &self.cx)
            .finish()
    }
}

impl LegalConfig {
    /// Resolve the bearer token from the configured env var.
    /// Returns `None` when the variable is unset or empty.
    pub fn credentials(&self) -> Option<LegalCredentials> {
        non_empty_env(&self.token_env).map(|token| LegalCredentials { token })
    }
}

impl SearchConfig {
    /// Resolve key and engine id. Both must be present.
    pub fn credentials(&self) -> Option<SearchCredentials> {
        let api_key = non_empty_env(&self.api_key_env)?;
        let cx = non_empty_env(&self.cx_env)?;
        Some(SearchCredentials { api_key, cx })
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(val) if !val.trim().is_empty() => Some(val),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.personscope/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| PersonScopeError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.personscope/personscope.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| PersonScopeError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        PersonScopeError::parse(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| PersonScopeError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| PersonScopeError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| PersonScopeError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
