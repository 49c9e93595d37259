//! Error types for metadata lookups and configuration.

use thiserror::Error;

/// Result type for metadata and configuration operations.
pub type Result<T> = std::result::Result<T, MetadataError>;

/// Errors that can occur while querying a metadata registry.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The registry has no entry for the requested distribution.
    #[error("Package not found: {0}")]
    PackageNotFound(String),

    /// The registry could not be consulted at all.
    #[error("Registry '{registry}' unavailable: {reason}")]
    Unavailable { registry: String, reason: String },

    /// The registry was read but its contents are unusable.
    #[error("Registry '{registry}' malformed: {reason}")]
    Malformed { registry: String, reason: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MetadataError {
    /// Whether this is the "no such distribution installed" case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, MetadataError::PackageNotFound(_))
    }
}
