//! # Register State
//!
//! Shared state handed to every command.
//!
//! ```text
//! ┌──────────────────┐ ┌──────────────────────┐ ┌──────────────────────┐
//! │    CartState     │ │   PreferenceStore    │ │     ApiClient        │
//! │  Arc<Mutex<Cart>>│ │  RwLock + hooks      │ │  token RwLock        │
//! └──────────────────┘ └──────────────────────┘ └──────────────────────┘
//!           ▲                      ▲                        ▲
//!           └────────────── Register (cheap to clone) ──────┘
//! ```

mod cart;
mod launch;

pub use cart::CartState;
pub use launch::{LaunchOptions, DEFAULT_IDLE_SECS, IDLE_SECS_PARAM};

use std::sync::Arc;

use izzymart_client::ApiClient;
use izzymart_store::PreferenceStore;

use crate::terminal::TerminalEnvironment;

/// Everything a command can touch.
#[derive(Clone)]
pub struct Register {
    pub cart: CartState,
    pub preferences: Arc<PreferenceStore>,
    pub api: ApiClient,
    /// Receives theme colors; paints command output.
    pub terminal: Arc<TerminalEnvironment>,
}

impl Register {
    pub fn new(
        cart: CartState,
        preferences: Arc<PreferenceStore>,
        api: ApiClient,
        terminal: Arc<TerminalEnvironment>,
    ) -> Self {
        Register {
            cart,
            preferences,
            api,
            terminal,
        }
    }
}
