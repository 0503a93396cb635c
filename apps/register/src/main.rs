//! # IzzyMart Register Entry Point
//!
//! ```text
//! izzymart-register [launch-url-or-query]
//!
//!   izzymart-register
//!   izzymart-register "?debug=true"
//!   izzymart-register "https://kiosk.local/checkout?idle_secs=120"
//! ```
//!
//! The setup lives in lib.rs so it can be tested.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match izzymart_register::run(std::env::args().nth(1)).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
