//! # Error Types
//!
//! Domain-specific error types for izzymart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  izzymart-core errors (this file)                                      │
//! │  └── CoreError        - Domain rule violations                         │
//! │                                                                         │
//! │  izzymart-store errors (separate crate)                                │
//! │  └── StoreError       - Blob store / persistence failures              │
//! │                                                                         │
//! │  izzymart-client errors (separate crate)                               │
//! │  └── ClientError      - HTTP / authentication failures                 │
//! │                                                                         │
//! │  Register app errors                                                   │
//! │  └── AppError         - What the operator sees (code + message)        │
//! │                                                                         │
//! │  Flow: CoreError / StoreError / ClientError → AppError → Terminal      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart operations themselves never fail; these errors only cover input
//! that has to be interpreted (theme names, wire amounts).

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Theme name is not part of the fixed palette.
    ///
    /// ## When This Occurs
    /// - Operator typed `theme magenta`
    /// - A persisted theme was renamed in a newer palette
    #[error("Unknown theme '{name}'. Available: {available}")]
    UnknownTheme { name: String, available: String },

    /// A monetary amount could not be represented.
    ///
    /// ## When This Occurs
    /// - Wire price is NaN or infinite
    /// - Operator typed a price that is not a number
    #[error("Invalid amount '{input}': {reason}")]
    InvalidAmount { input: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
