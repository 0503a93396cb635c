//! # Register Error Type
//!
//! Unified error type for register commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Register                           │
//! │                                                                         │
//! │  stdin line ──► input::parse ──► commands::dispatch                     │
//! │                      │                  │                               │
//! │                      ▼                  ▼                               │
//! │            AppError::validation   ClientError::Status{404} ──┐          │
//! │                                   StoreError::Write ─────────┤          │
//! │                                   CoreError::UnknownTheme ───┤          │
//! │                                                              ▼          │
//! │                                   AppError { code, message } ──► stderr │
//! │                                                                         │
//! │  "[NOT_FOUND] HTTP 404 from http://.../products/upc/000: ..."           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Errors are printed and the loop continues; only a stdin failure ends a
//! session early.

use std::fmt;

use izzymart_client::ClientError;
use izzymart_core::CoreError;
use izzymart_store::StoreError;
use serde::Serialize;

/// Error returned from register commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_AUTHENTICATED",
///   "message": "Not authenticated"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Catalog returned 404
    NotFound,

    /// Operator input could not be understood
    ValidationError,

    /// Command needs a session token
    NotAuthenticated,

    /// Catalog rejected the credentials (401/403)
    Unauthorized,

    /// Transport failure or unexpected HTTP status
    NetworkError,

    /// Preference storage failed
    StorageError,

    /// API client configuration is unusable
    ConfigError,

    /// Anything else
    Internal,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        let code = match &err {
            ClientError::NotAuthenticated => ErrorCode::NotAuthenticated,
            e if e.is_not_found() => ErrorCode::NotFound,
            e if e.is_unauthorized() || e.status() == Some(403) => ErrorCode::Unauthorized,
            // An operator-typed URL, not a broken config.
            ClientError::InvalidUrl(_) => ErrorCode::ValidationError,
            e if e.is_config_error() => ErrorCode::ConfigError,
            _ => ErrorCode::NetworkError,
        };
        AppError::new(code, err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Core(core) => core.into(),
            other => AppError::new(ErrorCode::StorageError, other.to_string()),
        }
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::internal(format!("I/O error: {}", err))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::NotAuthenticated => "NOT_AUTHENTICATED",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::NetworkError => "NETWORK_ERROR",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::Internal => "INTERNAL",
        };
        f.write_str(code)
    }
}

impl std::error::Error for AppError {}

/// Convenience alias for command results.
pub type AppResult<T> = Result<T, AppError>;
