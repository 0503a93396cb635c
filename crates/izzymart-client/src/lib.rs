//! # izzymart-client: Catalog Service Client
//!
//! HTTP access to the catalog/auth REST service used by the register.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Register command (scan / search / price / image)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 izzymart-client (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ApiConfig ──► ApiClient ──► reqwest ──► catalog service       │   │
//! │  │                   │                                             │   │
//! │  │                   └── Arc<RwLock<Option<token>>>                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use izzymart_client::{ApiClient, ApiConfig};
//!
//! let client = ApiClient::new(&ApiConfig::load_or_default(None))?;
//! let product = client.get_product_by_upc("012000001536", true).await?;
//!
//! client.login("root", "root").await?;
//! let hits = client.search_products("cola").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod client;
pub mod config;
pub mod error;
pub mod types;

// =============================================================================
// Re-exports
// =============================================================================

pub use client::{ApiClient, MAX_REAUTH_RETRIES};
pub use config::ApiConfig;
pub use error::{ClientError, ClientResult};
pub use types::{AuthTokenResponse, ImageFile, ProductPatch, UploadedFile};
