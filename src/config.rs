//! Host configuration parsed from environment variables.
//!
//! ERROR HANDLING
//! ==============
//! Invalid values are errors rather than silent defaults; `main` logs them
//! and exits. Unset values fall back to the defaults below.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("LOGBOOK_API_URL must start with http:// or https://, got {value:?}")]
    InvalidApiUrl { value: String },
    #[error("PORT must be a port number, got {value:?}")]
    InvalidPort { value: String },
    #[error("leptos configuration: {0}")]
    Leptos(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// Analyzer backend base URL, without a trailing `/`.
    pub api_url: String,
    pub port: u16,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self { api_url: DEFAULT_API_URL.to_owned(), port: DEFAULT_PORT }
    }
}

impl HostConfig {
    /// Build typed host config from environment variables.
    ///
    /// Optional:
    /// - `LOGBOOK_API_URL`: default `http://localhost:8000/api/v1`
    /// - `PORT`: default 3000
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_values(
            std::env::var("LOGBOOK_API_URL").ok().as_deref(),
            std::env::var("PORT").ok().as_deref(),
        )
    }

    /// # Errors
    ///
    /// See [`HostConfig::from_env`].
    pub fn from_values(api_url: Option<&str>, port: Option<&str>) -> Result<Self, ConfigError> {
        Ok(Self { api_url: parse_api_url(api_url)?, port: parse_port(port)? })
    }
}

fn parse_api_url(raw: Option<&str>) -> Result<String, ConfigError> {
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(DEFAULT_API_URL.to_owned());
    };
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(ConfigError::InvalidApiUrl { value: value.to_owned() });
    }
    Ok(value.trim_end_matches('/').to_owned())
}

fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(DEFAULT_PORT),
        Some(value) => value.parse::<u16>().map_err(|_| ConfigError::InvalidPort { value: value.to_owned() }),
    }
}
