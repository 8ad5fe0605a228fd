use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::search::{AMENDEMENT_SEARCH_URL, QUESTION_BASE_URL, QUESTION_SEARCH_PATH};

/// Client configuration loaded from multiple sources.
///
/// Configuration is loaded in priority order (lowest to highest):
/// 1. Struct defaults
/// 2. config.yaml file (if exists)
/// 3. Environment variables with AN_ prefix (always wins)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Amendment search endpoint.
    #[serde(default = "default_amendement_url")]
    pub amendement_url: String,

    /// Site root for the question search; next-page links are relative to it.
    /// Must end with a slash.
    #[serde(default = "default_question_base_url")]
    pub question_base_url: String,

    /// Question search path, relative to `question_base_url`.
    #[serde(default = "default_question_search_path")]
    pub question_search_path: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level filter (debug, info, warn, error), or any `EnvFilter` directive.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_amendement_url() -> String {
    AMENDEMENT_SEARCH_URL.to_string()
}

fn default_question_base_url() -> String {
    QUESTION_BASE_URL.to_string()
}

fn default_question_search_path() -> String {
    QUESTION_SEARCH_PATH.to_string()
}

// These functions cannot be const because serde uses function pointers for defaults
#[allow(clippy::missing_const_for_fn)]
fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("assemblee-client/{}", env!("CARGO_PKG_VERSION"))
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            amendement_url: default_amendement_url(),
            question_base_url: default_question_base_url(),
            question_search_path: default_question_search_path(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Sources are merged in priority order:
    /// 1. Struct defaults (lowest)
    /// 2. config.yaml file (if exists)
    /// 3. Environment variables with AN_ prefix (highest)
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config.yaml")
    }

    /// Load configuration with a custom YAML file path.
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load_from(yaml_path: &str) -> Result<Self, ConfigError> {
        let config: Self = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Yaml::file(yaml_path))
            .merge(Env::prefixed("AN_").split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let search = &self.search;

        if !is_http_url(&search.amendement_url) {
            return Err(ConfigError::Validation(format!(
                "search.amendement_url must start with http:// or https://, got: '{}'",
                search.amendement_url
            )));
        }

        if !is_http_url(&search.question_base_url) {
            return Err(ConfigError::Validation(format!(
                "search.question_base_url must start with http:// or https://, got: '{}'",
                search.question_base_url
            )));
        }

        // Relative links are joined onto the base; without the trailing slash
        // the last path segment would be dropped.
        if !search.question_base_url.ends_with('/') {
            return Err(ConfigError::Validation(format!(
                "search.question_base_url must end with '/', got: '{}'",
                search.question_base_url
            )));
        }

        if search.question_search_path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "search.question_search_path cannot be empty".into(),
            ));
        }

        if search.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "search.timeout_secs cannot be 0".into(),
            ));
        }

        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Validation(
                "logging.level cannot be empty".into(),
            ));
        }

        Ok(())
    }
}
