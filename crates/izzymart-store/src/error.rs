//! # Store Errors
//!
//! Error types for local persistence.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Store Error Handling                             │
//! │                                                                         │
//! │  std::io::Error ──────► StoreError::Read / Write (with file path)       │
//! │                                                                         │
//! │  serde_json::Error ───► StoreError::Serialization                       │
//! │                                                                         │
//! │  CoreError ───────────► StoreError::Core                                │
//! │                                                                         │
//! │  listener failure ────► StoreError::Hook                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AppError (apps/register) → shown to the operator                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use izzymart_core::CoreError;
use thiserror::Error;

/// Local persistence errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The blob file exists but could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The blob file (or its directory) could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A blob file or value is not the JSON we expect.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The platform offers no data directory and no override is set.
    #[error("Could not determine data directory: {0}")]
    DataDir(String),

    /// A value was rejected by domain rules (e.g. an unknown theme name).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An on-change listener rejected a preference change.
    #[error("Preference hook failed: {0}")]
    Hook(String),
}

impl StoreError {
    /// Creates a Hook error from any displayable cause.
    pub fn hook(reason: impl std::fmt::Display) -> Self {
        StoreError::Hook(reason.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_errors_name_the_file() {
        let err = StoreError::Write {
            path: PathBuf::from("/tmp/prefs.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "Failed to write /tmp/prefs.json: denied");
    }
}
