//! Per-read options: data-file search paths and a plugin option string.
//!
//! Options can be built programmatically or loaded from the environment.

use std::path::{Path, PathBuf};

/// Search path list, in the platform's `PATH` syntax.
pub const FILE_PATH_ENV: &str = "PAGETEX_FILE_PATH";

/// Whitespace-separated `key=value` option string.
pub const OPTIONS_ENV: &str = "PAGETEX_OPTIONS";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    /// Directories searched, in order, when a file is not found as given
    pub search_paths: Vec<PathBuf>,
    /// Plugin-specific settings such as `scale=2`
    pub option_string: String,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads options from environment variables.
    ///
    /// Environment variables:
    /// - `PAGETEX_FILE_PATH`: data-file search path list
    /// - `PAGETEX_OPTIONS`: option string
    ///
    /// # Errors
    /// Returns an error if the option string has a token without `=`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut options = Self::default();

        if let Some(paths) = std::env::var_os(FILE_PATH_ENV) {
            options.search_paths =
                std::env::split_paths(&paths).filter(|p| !p.as_os_str().is_empty()).collect();
        }

        if let Ok(value) = std::env::var(OPTIONS_ENV) {
            options = options.with_option_string(value)?;
        }

        Ok(options)
    }

    pub fn with_search_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.search_paths.push(path.as_ref().to_path_buf());
        self
    }

    /// Sets the option string after checking every token is `key=value`.
    pub fn with_option_string(mut self, value: impl Into<String>) -> Result<Self, ConfigError> {
        let value = value.into();
        if let Some(token) = value.split_whitespace().find(|token| !token.contains('=')) {
            return Err(ConfigError::InvalidValue(token.to_owned()));
        }
        self.option_string = value;
        Ok(self)
    }

    /// Value of `key` in the option string; the last occurrence wins.
    pub fn option_value(&self, key: &str) -> Option<&str> {
        self.option_string
            .split_whitespace()
            .filter_map(|token| token.split_once('='))
            .filter(|(k, _)| *k == key)
            .map(|(_, v)| v)
            .last()
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid option token (expected key=value): {0}")]
    InvalidValue(String),
}
