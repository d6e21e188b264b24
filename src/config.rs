//! Configuration handling for the TUI
//!
//! Settings come from three places. The JSON config file holds everything,
//! the legacy `~/.config/pj-tui.env` file and the process environment can
//! override the API URL.

use crate::api::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::input::KeyMap;
use anyhow::{Context, Result};
use directories::{BaseDirs, ProjectDirs};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

/// Environment variable naming the API base URL
pub const API_URL_VAR: &str = "PROJECTARIUM_API_URL";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TuiConfig {
    /// API base URL, e.g. `http://localhost:8888/api`
    pub api_base_url: Option<String>,
    /// Per-request timeout in seconds
    pub request_timeout_secs: Option<u64>,
    /// Action name to shortcuts, replacing the defaults for that action
    #[serde(default)]
    pub keybindings: HashMap<String, Vec<String>>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "projectarium", "projectarium-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                let content = fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?;
                let config: TuiConfig = serde_json::from_str(&content)
                    .with_context(|| format!("parsing {}", path.display()))?;
                debug!(path = %path.display(), "Loaded config");
                return Ok(config);
            }
        }

        Ok(Self::default())
    }
}

/// Path of the legacy `KEY=VALUE` file
fn env_file_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(".config").join("pj-tui.env"))
}

/// Parse `KEY=VALUE` lines. Blank lines and `#` comments are skipped, as are
/// lines without `=`. Surrounding quotes on values are removed.
pub fn parse_env_file(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let (key, value) = line.split_once('=')?;
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value);
            Some((key.trim().to_string(), value.to_string()))
        })
        .collect()
}

/// Everything the app needs from configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub timeout: Duration,
    pub keymap: KeyMap,
}

impl Settings {
    /// Read config file, env file and environment
    pub fn load() -> Result<Self> {
        let config = TuiConfig::load()?;

        let env_file = match env_file_path() {
            Some(path) if path.exists() => match fs::read_to_string(&path) {
                Ok(content) => parse_env_file(&content),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "Cannot read env file");
                    HashMap::new()
                }
            },
            _ => HashMap::new(),
        };

        let env_var = std::env::var(API_URL_VAR).ok();
        Ok(Self::resolve(&config, env_var, &env_file))
    }

    /// Combine sources. The base URL is taken from the environment variable,
    /// then the env file, then the config file, then the default.
    pub fn resolve(
        config: &TuiConfig,
        env_var: Option<String>,
        env_file: &HashMap<String, String>,
    ) -> Self {
        let api_base_url = env_var
            .into_iter()
            .chain(env_file.get(API_URL_VAR).cloned())
            .chain(config.api_base_url.clone())
            .map(|url| url.trim().to_string())
            .find(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = match config.request_timeout_secs {
            Some(0) => {
                warn!("Ignoring zero request timeout");
                DEFAULT_TIMEOUT
            }
            Some(secs) => Duration::from_secs(secs),
            None => DEFAULT_TIMEOUT,
        };

        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            timeout,
            keymap: KeyMap::with_overrides(&config.keybindings),
        }
    }
}
