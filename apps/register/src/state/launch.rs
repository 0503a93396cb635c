//! # Launch Options
//!
//! Settings read once at startup from the launch location (a URL or bare
//! query string passed as the first argument).
//!
//! ```text
//! izzymart-register "https://pos.local/checkout?debug=true&idle_secs=120"
//!                                             └─ debug ─┘ └── idle ───┘
//! ```

use std::time::Duration;

use izzymart_core::QueryParams;

/// Query parameter holding the idle timeout in seconds.
pub const IDLE_SECS_PARAM: &str = "idle_secs";

/// Idle timeout when the launch location names none.
pub const DEFAULT_IDLE_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchOptions {
    /// Verbose logging requested via `debug`.
    pub debug: bool,

    /// Time without input before the cart is cleared.
    pub idle_timeout: Duration,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        LaunchOptions {
            debug: false,
            idle_timeout: Duration::from_secs(DEFAULT_IDLE_SECS),
        }
    }
}

impl LaunchOptions {
    /// Reads options from an optional launch location.
    ///
    /// An `idle_secs` that is not a positive integer keeps the default.
    pub fn from_launch(launch: Option<&str>) -> Self {
        let params = QueryParams::parse(launch.unwrap_or_default());
        let mut options = LaunchOptions {
            debug: params.is_debug_mode(),
            ..Default::default()
        };

        let secs = params
            .get_url_param(IDLE_SECS_PARAM)
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0);
        if let Some(secs) = secs {
            options.idle_timeout = Duration::from_secs(secs);
        }

        options
    }
}
