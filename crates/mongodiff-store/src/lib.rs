//! mongodiff store - MongoDB access for the capture pipeline
//!
//! Provides:
//! - A TCP liveness probe run before the first snapshot
//! - Conversion between BSON `_id` values and core identifiers
//! - `MongoSource`, the driver-backed `DocumentSource`

pub mod convert;
pub mod errors;
pub mod probe;
pub mod source;

// Re-export key types
pub use errors::Result;
pub use probe::{probe, DEFAULT_PORT};
pub use source::{ConnectOptions, MongoSource};
