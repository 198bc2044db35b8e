//! Generator configuration.
//!
//! Resolved in layers: built-in defaults, then an optional YAML file, then
//! `STORYSPEC_*` environment overrides.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default model used for every completion request.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
/// Output budget for one platform generation call (and its retry).
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 16_000;
/// Output budget for the integration-strategy call.
pub const DEFAULT_INTEGRATION_MAX_TOKENS: u32 = 8_000;
/// Default Anthropic messages endpoint.
pub const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";
/// Default Anthropic API version header.
pub const DEFAULT_API_VERSION: &str = "2023-06-01";

/// Settings shared by every stage of the generation pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Model identifier sent with every request.
    pub model: String,
    /// Output token cap for platform calls.
    pub max_output_tokens: u32,
    /// Output token cap for the integration-strategy call.
    pub integration_max_tokens: u32,
    /// Per-request timeout in seconds. `None` waits indefinitely.
    pub request_timeout_secs: Option<u64>,
    /// Messages API endpoint.
    pub api_url: String,
    /// Value of the `anthropic-version` header.
    pub api_version: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.into(),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            integration_max_tokens: DEFAULT_INTEGRATION_MAX_TOKENS,
            request_timeout_secs: None,
            api_url: DEFAULT_API_URL.into(),
            api_version: DEFAULT_API_VERSION.into(),
        }
    }
}

impl GeneratorConfig {
    /// Loads configuration from an optional YAML file and the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if an
    /// environment override is malformed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        base.with_overrides(|var| std::env::var(var).ok())
    }

    /// Reads a YAML config file. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        serde_yaml::from_str(&content)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    /// Applies `STORYSPEC_*` overrides fetched through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric override does not parse.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(model) = lookup("STORYSPEC_MODEL") {
            self.model = model;
        }
        if let Some(url) = lookup("STORYSPEC_API_URL") {
            self.api_url = url;
        }
        if let Some(tokens) = parse_var(&lookup, "STORYSPEC_MAX_OUTPUT_TOKENS")? {
            self.max_output_tokens = tokens;
        }
        if let Some(tokens) = parse_var(&lookup, "STORYSPEC_INTEGRATION_MAX_TOKENS")? {
            self.integration_max_tokens = tokens;
        }
        if let Some(secs) = parse_var(&lookup, "STORYSPEC_TIMEOUT_SECS")? {
            self.request_timeout_secs = Some(secs);
        }
        Ok(self)
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { var, value }),
    }
}
