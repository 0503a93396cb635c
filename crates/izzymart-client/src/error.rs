//! # Client Error Types
//!
//! Error types for catalog service calls and client configuration.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Session       │  │     HTTP                │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  NotAuthent-    │  │  Status {status, url}   │ │
//! │  │  InvalidUrl     │  │  icated (local) │  │  Http (transport)       │ │
//! │  │  ConfigLoad/Save│  │                 │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Everything that can go wrong talking to the catalog service.
#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Session Errors
    // =========================================================================
    /// An authenticated call was attempted with no token held.
    ///
    /// Raised locally, before any request is sent.
    #[error("Not authenticated")]
    NotAuthenticated,

    // =========================================================================
    // HTTP Errors
    // =========================================================================
    /// The service answered with a non-success status.
    #[error("HTTP {status} from {url}: {body}")]
    Status {
        status: u16,
        url: String,
        body: String,
    },

    /// The request never got a response (connect, TLS, decode, timeout).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        ClientError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ClientError {
    /// HTTP status code, if the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns true if the service rejected our credentials (HTTP 401).
    ///
    /// A locally missing token is NOT an unauthorized response.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Returns true for HTTP 404.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidUrl(_)
                | ClientError::InvalidConfig(_)
                | ClientError::ConfigLoadFailed(_)
                | ClientError::ConfigSaveFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> ClientError {
        ClientError::Status {
            status: code,
            url: "http://localhost:8000/api/v1/products".into(),
            body: "{}".into(),
        }
    }

    #[test]
    fn test_categorization() {
        assert!(status(401).is_unauthorized());
        assert!(!status(403).is_unauthorized());
        assert!(status(404).is_not_found());
        assert!(!ClientError::NotAuthenticated.is_unauthorized());
        assert_eq!(ClientError::NotAuthenticated.status(), None);

        assert!(ClientError::InvalidUrl("x".into()).is_config_error());
        assert!(!status(500).is_config_error());
    }

    #[test]
    fn test_error_display() {
        let err = status(404);
        assert_eq!(
            err.to_string(),
            "HTTP 404 from http://localhost:8000/api/v1/products: {}"
        );
    }
}
