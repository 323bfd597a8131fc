//! Error handling for mongodiff-store
//!
//! Wraps mongodiff-core ExError with driver-specific helpers

use mongodiff_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a connectivity error for a host that could not be reached
pub fn unreachable(host: &str, reason: impl std::fmt::Display) -> ExError {
    ExError::new(ExErrorKind::Connectivity)
        .with_op("probe")
        .with_message(format!("MongoDB is not up at {}: {}", host, reason))
}

/// Create a connectivity error from a driver failure
pub fn connectivity(op: &str, err: mongodb::error::Error) -> ExError {
    ExError::new(ExErrorKind::Connectivity)
        .with_op(op)
        .with_message(err.to_string())
}

/// Create a read error for a collection from a driver failure
pub fn read_error(op: &str, collection: &str, err: mongodb::error::Error) -> ExError {
    ExError::new(ExErrorKind::Read)
        .with_op(op)
        .with_collection(collection)
        .with_message(err.to_string())
}

/// Create an invalid-input error for a malformed host
pub fn invalid_host(host: &str, reason: impl std::fmt::Display) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("connect")
        .with_message(format!("Invalid host {}: {}", host, reason))
}
