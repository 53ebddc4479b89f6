//! Controller configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::theme::ThemePreference;

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "theme";

/// Settings for a [`ThemeController`](crate::ThemeController).
///
/// Every field has a default, so a config file only needs the keys it
/// changes:
///
/// ```json
/// { "persist_on_startup": false }
/// ```
///
/// # Example
///
/// ```rust
/// use shade::{ShadeConfig, ThemePreference};
///
/// let config = ShadeConfig::new()
///     .with_storage_key("app.theme")
///     .with_fallback(ThemePreference::Dark)
///     .with_persist_on_startup(false);
///
/// assert_eq!(config.storage_key, "app.theme");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadeConfig {
    /// Key under which the preference is persisted.
    pub storage_key: String,
    /// Preference used when neither the store nor the ambient signal has one.
    pub fallback: ThemePreference,
    /// Write the resolved preference to the store during initialization,
    /// even when it came from the ambient signal.
    ///
    /// When `true`, ambient tracking stops after the first initialization.
    /// When `false`, only explicit choices are persisted.
    pub persist_on_startup: bool,
}

impl ShadeConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_fallback(mut self, fallback: ThemePreference) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_persist_on_startup(mut self, persist: bool) -> Self {
        self.persist_on_startup = persist;
        self
    }
}

impl Default for ShadeConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            fallback: ThemePreference::Light,
            persist_on_startup: true,
        }
    }
}
