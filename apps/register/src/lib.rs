//! # IzzyMart Register Library
//!
//! The terminal register: reads operator input from stdin and drives the
//! cart, the catalog client and the preference store.
//!
//! ## Module Organization
//! ```text
//! izzymart_register/
//! ├── lib.rs          ◄─── You are here (startup & input loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── Register handle
//! │   ├── cart.rs     ◄─── Cart state management
//! │   └── launch.rs   ◄─── Launch options (debug, idle_secs)
//! ├── commands/
//! │   ├── mod.rs      ◄─── dispatch
//! │   ├── cart.rs     ◄─── Scan and cart manipulation
//! │   ├── product.rs  ◄─── Search
//! │   ├── admin.rs    ◄─── Login and catalog edits
//! │   └── settings.rs ◄─── Store name, theme, camera
//! ├── inactivity.rs   ◄─── Idle countdown
//! ├── input.rs        ◄─── Line parser
//! ├── terminal.rs     ◄─── Theme-colored output
//! └── error.rs        ◄─── Error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod inactivity;
pub mod input;
pub mod state;
pub mod terminal;

use std::sync::Arc;

use izzymart_client::{ApiClient, ApiConfig};
use izzymart_store::{BlobStore, FileBlobStore, MemoryBlobStore, PreferenceStore};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use commands::Outcome;
use error::AppResult;
use inactivity::{ActivitySignal, InactivityTracker};
use state::{CartState, LaunchOptions, Register};
use terminal::{TerminalEnvironment, Tone};

/// Capacity of the activity channel; a lagging tracker still sees activity.
const ACTIVITY_CHANNEL_CAPACITY: usize = 64;

/// Runs the register until `quit` or end of input.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Register Startup                                  │
/// │                                                                         │
/// │  1. Launch options ─── debug, idle_secs from the launch URL             │
/// │  2. Logging ────────── tracing-subscriber with env filter               │
/// │  3. Preferences ───── preferences.json (memory if unavailable)          │
/// │                        theme applied to the terminal                    │
/// │  4. Catalog client ── api.toml + IZZYMART_API_* overrides               │
/// │  5. Idle tracker ──── clears the cart after idle_secs without input     │
/// │  6. Input loop ────── each stdin line: activity + command               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(launch: Option<String>) -> AppResult<()> {
    let options = LaunchOptions::from_launch(launch.as_deref());
    init_tracing(options.debug);

    info!(
        debug = options.debug,
        idle_secs = options.idle_timeout.as_secs(),
        "Starting IzzyMart register"
    );

    let terminal = Arc::new(TerminalEnvironment::from_env());
    let preferences = PreferenceStore::load(open_blob_store(), terminal.clone())?;
    let api = ApiClient::new(&ApiConfig::load_or_default(None))?;
    info!(base_url = api.base_url(), "Catalog client ready");

    let register = Register::new(CartState::new(), Arc::new(preferences), api, terminal);

    let (activity, activity_rx) = broadcast::channel(ACTIVITY_CHANNEL_CAPACITY);
    let idle_cart = register.cart.clone();
    let tracker = InactivityTracker::start(options.idle_timeout, activity_rx, move || {
        idle_cart.with_cart_mut(|cart| {
            if cart.is_empty() {
                return;
            }
            let ended = cart.id();
            cart.clear_cart();
            info!(session = %ended, next_session = %cart.id(), "Idle timeout, cart cleared");
        });
    });

    println!(
        "{}",
        register.terminal.paint(
            Tone::Primary,
            &format!("== {} == (type 'help')", register.preferences.store_name())
        )
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        // No receiver only after cleanup.
        let _ = activity.send(ActivitySignal::KeyPress);

        let command = match input::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        match commands::dispatch(&register, command).await {
            Ok(Outcome::Reply(text)) => println!("{}", text),
            Ok(Outcome::Quit) => break,
            Err(e) => {
                warn!(code = %e.code, "Command failed");
                eprintln!("{}", e);
            }
        }
    }

    tracker.cleanup();
    info!("Register closed");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG` wins when set
/// - `debug` launch parameter: everything at DEBUG
/// - Default: INFO, DEBUG for the izzymart crates
fn init_tracing(debug: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info,izzymart=debug")
        }
    });

    // Logs go to stderr so replies on stdout stay clean.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Opens the preferences file, falling back to memory for this session.
fn open_blob_store() -> Arc<dyn BlobStore> {
    match FileBlobStore::open_default() {
        Ok(store) => {
            info!(path = %store.path().display(), "Preferences file opened");
            Arc::new(store)
        }
        Err(e) => {
            warn!(error = %e, "Preferences file unavailable; changes will not persist");
            Arc::new(MemoryBlobStore::new())
        }
    }
}
