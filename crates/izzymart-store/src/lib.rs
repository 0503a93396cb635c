//! # izzymart-store: Local Persistence for the IzzyMart Register
//!
//! Key-value blob storage and the preference store built on top of it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     IzzyMart Register Data Flow                         │
//! │                                                                         │
//! │  `name`, `theme`, `camera` commands                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  izzymart-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────────────────┐        ┌──────────────────────────┐ │   │
//! │  │   │   PreferenceStore    │        │   BlobStore              │ │   │
//! │  │   │  (preferences.rs)    │───────►│   (blob.rs)              │ │   │
//! │  │   │                      │ persist│                          │ │   │
//! │  │   │  store name, theme,  │        │   Memory / File          │ │   │
//! │  │   │  camera scanning     │        │                          │ │   │
//! │  │   └──────────┬───────────┘        └────────────┬─────────────┘ │   │
//! │  │              │ theme hook                      │               │   │
//! │  └──────────────┼─────────────────────────────────┼───────────────┘   │
//! │                 ▼                                 ▼                   │
//! │     dyn VisualEnvironment             <data dir>/preferences.json     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use izzymart_store::{FileBlobStore, NoOpEnvironment, PreferenceStore};
//!
//! let blob = Arc::new(FileBlobStore::open_default()?);
//! let prefs = PreferenceStore::load(blob, Arc::new(NoOpEnvironment))?;
//!
//! prefs.set_theme_by_name("teal")?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod blob;
pub mod error;
pub mod preferences;

// =============================================================================
// Re-exports
// =============================================================================

pub use blob::{BlobStore, FileBlobStore, MemoryBlobStore};
pub use error::{StoreError, StoreResult};
pub use preferences::{
    NoOpEnvironment, PreferenceChange, PreferenceListener, PreferenceStore, Preferences,
    RecordingEnvironment, VisualEnvironment,
};
