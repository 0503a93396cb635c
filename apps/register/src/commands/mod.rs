//! # Register Commands
//!
//! One function per operator action, grouped by area, plus [`dispatch`]
//! which runs a parsed [`Command`] and renders its reply.
//!
//! ## Command Categories
//! - **cart**: scan, remove, delete, clear, show
//! - **product**: search
//! - **admin**: login, logout, price, drop, image
//! - **settings**: store name, theme, camera scanning

pub mod admin;
pub mod cart;
pub mod product;
pub mod settings;

use crate::error::AppResult;
use crate::input::{Command, HELP};
use crate::state::Register;
use crate::terminal::Tone;

use self::cart::CartResponse;
use self::product::ProductSummary;

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Reply(String),
    Quit,
}

/// Runs one command against the register.
pub async fn dispatch(register: &Register, command: Command) -> AppResult<Outcome> {
    let term = register.terminal.as_ref();
    let show_cart = |response: CartResponse| {
        Outcome::Reply(response.render(term, &register.preferences.store_name()))
    };

    let outcome = match command {
        Command::Scan(upc) => show_cart(cart::scan(register, &upc).await?),
        Command::Remove(upc) => show_cart(cart::remove_from_cart(register, &upc)),
        Command::Delete(upc) => show_cart(cart::delete_from_cart(register, &upc)),
        Command::Clear => show_cart(cart::clear_cart(register)),
        Command::Cart => show_cart(cart::get_cart(register)),

        Command::Search(query) => {
            let results = product::search_products(register, &query).await?;
            Outcome::Reply(ProductSummary::render_list(&results, term))
        }

        Command::Login { username, password } => {
            admin::login(register, &username, &password).await?;
            Outcome::Reply(format!("Logged in as {}", username))
        }
        Command::Logout => {
            admin::logout(register).await;
            Outcome::Reply("Logged out".to_string())
        }
        Command::Price { product_id, amount } => {
            admin::set_price(register, &product_id, amount).await?;
            Outcome::Reply(format!("{} now costs {}", product_id, amount))
        }
        Command::Drop(product_id) => {
            admin::drop_product(register, &product_id).await?;
            Outcome::Reply(format!("Deleted {}", product_id))
        }
        Command::Image { product_id, url } => {
            let served_at = admin::attach_image(register, &product_id, &url).await?;
            Outcome::Reply(format!("Image added: {}", served_at))
        }

        Command::Name(name) => {
            settings::set_store_name(register, &name)?;
            Outcome::Reply(term.paint(Tone::Primary, &format!("== {} ==", name.trim())))
        }
        Command::Theme(name) => {
            let theme = settings::set_theme(register, &name)?;
            Outcome::Reply(term.paint(Tone::Accent, &format!("Theme set to {}", theme.name)))
        }
        Command::Camera(enabled) => {
            settings::set_camera_scanning(register, enabled)?;
            Outcome::Reply(format!(
                "Camera scanning {}",
                if enabled { "on" } else { "off" }
            ))
        }
        Command::Prefs => Outcome::Reply(settings::get_preferences(register).render(term)),

        Command::Help => Outcome::Reply(HELP.to_string()),
        Command::Quit => Outcome::Quit,
    };

    Ok(outcome)
}

/// Register over in-memory preferences and an unreachable catalog.
#[cfg(test)]
pub(crate) fn test_register() -> Register {
    use std::sync::Arc;

    use izzymart_client::{ApiClient, ApiConfig};
    use izzymart_store::{MemoryBlobStore, PreferenceStore};

    use crate::state::CartState;
    use crate::terminal::TerminalEnvironment;

    let terminal = Arc::new(TerminalEnvironment::new(false));
    let preferences =
        PreferenceStore::load(Arc::new(MemoryBlobStore::new()), terminal.clone()).unwrap();
    let api = ApiClient::new(&ApiConfig::new("http://127.0.0.1:9/api/v1")).unwrap();

    Register::new(CartState::new(), Arc::new(preferences), api, terminal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::input::parse;

    async fn run(register: &Register, line: &str) -> AppResult<Outcome> {
        dispatch(register, parse(line)?.unwrap()).await
    }

    fn reply(outcome: Outcome) -> String {
        match outcome {
            Outcome::Reply(text) => text,
            Outcome::Quit => panic!("unexpected quit"),
        }
    }

    #[tokio::test]
    async fn test_settings_round_trip_through_dispatch() {
        let register = test_register();

        run(&register, "name Corner Shop").await.unwrap();
        run(&register, "camera on").await.unwrap();
        let text = reply(run(&register, "theme green").await.unwrap());
        assert_eq!(text, "Theme set to Green");

        let prefs = reply(run(&register, "prefs").await.unwrap());
        assert!(prefs.contains("Corner Shop"));
        assert!(prefs.contains("[Green]"));
        assert!(prefs.contains("camera:     on"));

        let cart = reply(run(&register, "cart").await.unwrap());
        assert!(cart.starts_with("== Corner Shop =="));
    }

    #[tokio::test]
    async fn test_search_and_admin_need_a_session() {
        let register = test_register();

        for line in ["search cola", "price p-1 2.50", "drop p-1"] {
            let err = run(&register, line).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::NotAuthenticated, "{line}");
        }
    }

    #[tokio::test]
    async fn test_help_and_quit() {
        let register = test_register();

        assert!(reply(run(&register, "help").await.unwrap()).contains("camera on|off"));
        assert_eq!(run(&register, "quit").await.unwrap(), Outcome::Quit);
    }
}
