//! Error types.
//!
//! Theme operations never fail; these errors only come out of loading things
//! from disk and building route tables.

use std::path::PathBuf;

/// Error returned when a [`FileStore`](crate::FileStore) cannot be opened.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The preference file exists but could not be read.
    #[error("failed to read preference file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The preference file is not a JSON object of strings.
    #[error("malformed preference file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Error returned when a [`ShadeConfig`](crate::ShadeConfig) file cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Error returned by route table construction and navigation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// No route matches the requested path.
    #[error("no route matches '{path}'")]
    NotFound { path: String },
    /// Two routes share the same path.
    #[error("duplicate route path '{path}' (routes '{first}' and '{second}')")]
    DuplicatePath {
        path: String,
        first: String,
        second: String,
    },
    /// Two routes share the same name.
    #[error("duplicate route name '{name}'")]
    DuplicateName { name: String },
    /// A route path does not start with '/'.
    #[error("route '{name}' has path '{path}', which does not start with '/'")]
    InvalidPath { name: String, path: String },
}
