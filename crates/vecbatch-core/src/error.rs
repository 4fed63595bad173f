//! Error types for vecbatch operations.
//!
//! This module provides the common `Error` type and `Result<T>` alias used
//! across all vecbatch crates. Uses `thiserror` for derive macros.
//!
//! Every failure surfaces to the process entry point; nothing in the
//! pipeline retries or recovers locally.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur in vecbatch operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error without path context.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error with the offending path.
    #[error("I/O error at {path}: {source}")]
    IoWithPath {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The input corpus is missing, unreadable, or not a JSON array of objects.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A text-synthesis hook was invoked on a loader that was never specialized.
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// Too few documents to build an index.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// The embedding provider failed or returned unusable vectors.
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// The vector index capability failed.
    #[error("Index error: {0}")]
    Index(String),

    /// A persisted index could not be written or read back.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// A persisted index was built with a different embedding configuration.
    #[error("Configuration mismatch on {field}: index has '{expected}', current is '{found}'")]
    ConfigurationMismatch {
        /// Manifest field that differs.
        field: String,
        /// Value recorded in the persisted index.
        expected: String,
        /// Value of the current configuration.
        found: String,
    },

    /// Generic operation failure.
    #[error("Operation failed: {0}")]
    Operation(String),
}

impl Error {
    /// Wrap an I/O error with the path that caused it.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::IoWithPath {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a malformed input error.
    pub fn malformed_input(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }

    /// Create a not-implemented error.
    pub fn not_implemented(msg: impl Into<String>) -> Self {
        Self::NotImplemented(msg.into())
    }

    /// Create an empty input error.
    pub fn empty_input(msg: impl Into<String>) -> Self {
        Self::EmptyInput(msg.into())
    }

    /// Create an embedding error.
    pub fn embedding(msg: impl Into<String>) -> Self {
        Self::Embedding(msg.into())
    }

    /// Create an index error.
    pub fn index(msg: impl Into<String>) -> Self {
        Self::Index(msg.into())
    }

    /// Create a persistence error.
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Create a configuration mismatch error.
    pub fn mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::ConfigurationMismatch {
            field: field.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a generic operation error.
    pub fn operation(msg: impl Into<String>) -> Self {
        Self::Operation(msg.into())
    }

    /// Whether this error indicates a defect rather than a runtime condition.
    pub fn is_programming_error(&self) -> bool {
        matches!(self, Self::NotImplemented(_))
    }
}

/// Result type alias using vecbatch's Error type.
pub type Result<T> = std::result::Result<T, Error>;
