//! # izzymart-core: Pure Business Logic for the IzzyMart Register
//!
//! This crate holds the domain logic of the register as pure functions and
//! plain value types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     IzzyMart Register Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/register (terminal loop)                   │   │
//! │  │    Scan ──► Cart ──► Search ──► Admin edits ──► Preferences    │   │
//! │  └───────────────┬─────────────────────────────┬───────────────────┘   │
//! │                  │                             │                        │
//! │  ┌───────────────▼───────────────┐  ┌──────────▼──────────────────┐    │
//! │  │ izzymart-store                │  │ izzymart-client             │    │
//! │  │ blob store, preferences       │  │ catalog REST API, bearer    │    │
//! │  └───────────────┬───────────────┘  └──────────┬──────────────────┘    │
//! │                  │                             │                        │
//! │  ┌───────────────▼─────────────────────────────▼───────────────────┐   │
//! │  │               ★ izzymart-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────────┐   │   │
//! │  │   │  types   │  │  money   │  │   cart   │  │ theme        │   │   │
//! │  │   │ Product  │  │  Money   │  │   Cart   │  │ url_params   │   │   │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO TIMERS • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog value types (Product, NutritionInfo)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Shopping cart keyed by UPC
//! - [`theme`] - Fixed color theme palette
//! - [`url_params`] - Query string helpers for launch parameters
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use izzymart_core::{Cart, Product};
//!
//! let mut cart = Cart::new();
//! let soda = Product::new("012000001536").with_name("Soda").with_price(2.0);
//!
//! cart.add_item(soda.clone());
//! cart.add_item(soda);
//!
//! assert_eq!(cart.line_count(), 1);
//! assert_eq!(cart.item_count(), 2);
//! assert_eq!(cart.total().cents(), 400);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod theme;
pub mod types;
pub mod url_params;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use izzymart_core::Money` instead of
// `use izzymart_core::money::Money`

pub use cart::{Cart, CartItem, CartTotals};
pub use error::{CoreError, CoreResult};
pub use money::Money;
pub use theme::{ThemeColor, DEFAULT_THEME_INDEX, THEME_PALETTE};
pub use types::*;
pub use url_params::QueryParams;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Store name shown when nothing has been configured yet.
pub const DEFAULT_STORE_NAME: &str = "IzzyMart";
