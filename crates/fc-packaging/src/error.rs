//! Error types for block packaging

use thiserror::Error;

/// Result type alias for packaging operations
pub type Result<T> = std::result::Result<T, PackagingError>;

/// Errors that can occur during packaging
///
/// A round never fails for a single transaction or group; these errors
/// cover misconfiguration and invariant violations only.
#[derive(Debug, Error)]
pub enum PackagingError {
    /// Configuration rejected at construction
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
