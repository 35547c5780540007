//! Error types for weekstash.
//!
//! This module defines all error types used throughout the weekstash crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for weekstash operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Store Errors ===
    /// Failed to read the store file.
    #[error("failed to read store at {path}: {source}")]
    StoreRead {
        /// Path to the store file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the store file.
    #[error("failed to write store at {path}: {source}")]
    StoreWrite {
        /// Path to the store file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A record with the given id already exists in the store.
    #[error("duplicate record id: {id}")]
    DuplicateId {
        /// The conflicting id.
        id: String,
    },

    /// No record with the given id exists in the store.
    #[error("no record with id: {id}")]
    RecordNotFound {
        /// The requested id.
        id: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Upload Errors ===
    /// Failed to read a file selected for upload.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        /// Path to the file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A file exceeds the configured upload size bound.
    #[error("file {path} is {size} bytes, above the {limit} byte limit")]
    FileTooLarge {
        /// Path to the file.
        path: PathBuf,
        /// Actual size in bytes.
        size: u64,
        /// Configured limit in bytes.
        limit: u64,
    },

    // === Data URI Errors ===
    /// A data URI could not be parsed or decoded.
    #[error("malformed data URI: {message}")]
    DataUri {
        /// Description of what went wrong.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for weekstash operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create a new malformed-data-URI error.
    #[must_use]
    pub fn data_uri(message: impl Into<String>) -> Self {
        Self::DataUri {
            message: message.into(),
        }
    }

    /// Create a new record-not-found error.
    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::RecordNotFound { id: id.into() }
    }

    /// Check if this error means the requested record does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RecordNotFound { .. })
    }

    /// Check if this error is an upload size rejection.
    #[must_use]
    pub fn is_too_large(&self) -> bool {
        matches!(self, Self::FileTooLarge { .. })
    }
}
