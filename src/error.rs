//! Error types for paddock
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use std::path::Path;
use thiserror::Error;

/// The main error type for paddock
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Dataset Errors
    // ============================================================================
    #[error("Dataset directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("Cannot read '{path}' as Parquet: {message}")]
    FileUnreadable { path: String, message: String },

    // ============================================================================
    // Backend Errors
    // ============================================================================
    #[error("Unknown backend '{name}' (expected one of: duckdb, dataframe, postgres)")]
    UnknownBackend { name: String },

    #[error("Connection to {target} refused: {message}")]
    ConnectionRefused { target: String, message: String },

    #[error("Failed to load DuckDB extension '{name}': {message}")]
    Extension { name: String, message: String },

    #[error("Column '{column}' of table '{table}' has unsupported Arrow type {type_name}")]
    UnsupportedType {
        table: String,
        column: String,
        type_name: String,
    },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Engine Errors
    // ============================================================================
    #[error("DuckDB error: {0}")]
    Duckdb(#[from] duckdb::Error),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a directory-not-found error
    pub fn directory_not_found(path: impl AsRef<Path>) -> Self {
        Self::DirectoryNotFound {
            path: path.as_ref().display().to_string(),
        }
    }

    /// Create a file-unreadable error
    pub fn file_unreadable(path: impl AsRef<Path>, message: impl ToString) -> Self {
        Self::FileUnreadable {
            path: path.as_ref().display().to_string(),
            message: message.to_string(),
        }
    }

    /// Create an unknown-backend error
    pub fn unknown_backend(name: impl Into<String>) -> Self {
        Self::UnknownBackend { name: name.into() }
    }

    /// Create a connection-refused error
    pub fn connection_refused(target: impl Into<String>, message: impl ToString) -> Self {
        Self::ConnectionRefused {
            target: target.into(),
            message: message.to_string(),
        }
    }

    /// Create an extension error
    pub fn extension(name: impl Into<String>, message: impl ToString) -> Self {
        Self::Extension {
            name: name.into(),
            message: message.to_string(),
        }
    }
}

/// Result type alias for paddock
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
