//! # Register Input
//!
//! Turns one line of operator input into a [`Command`].
//!
//! A line holding only digits is a barcode scan, the way a USB scanner
//! types it followed by Enter.

use izzymart_core::Money;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Look up a UPC and add one unit.
    Scan(String),
    /// Remove one unit.
    Remove(String),
    /// Remove the whole line.
    Delete(String),
    Clear,
    Cart,
    Search(String),
    Login { username: String, password: String },
    Logout,
    Price { product_id: String, amount: Money },
    Drop(String),
    Image { product_id: String, url: String },
    Name(String),
    Theme(String),
    Camera(bool),
    Prefs,
    Help,
    Quit,
}

/// One line per command, shown by `help`.
pub const HELP: &str = "\
<upc> | scan <upc>            look up a product and add it
remove <upc>                  remove one unit
delete <upc>                  remove the whole line
clear                         empty the cart
cart                          show the cart
search <query>                search products by name or brand
login <user> <password>       start an admin session
logout                        end the admin session
price <product-id> <amount>   change a product's price
drop <product-id>             delete a product
image <product-id> <url>      attach an image from a URL
name <store name>             rename the store
theme <name>                  switch color theme
camera on|off                 toggle camera scanning
prefs                         show preferences
help                          show this list
quit                          leave the register";

/// Parses a line. Blank lines yield `None`.
pub fn parse(line: &str) -> AppResult<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    if rest.is_empty() && word.chars().all(|c| c.is_ascii_digit()) {
        return Ok(Some(Command::Scan(word.to_string())));
    }

    let command = match word.to_lowercase().as_str() {
        "scan" | "upc" => Command::Scan(single(word, rest, "<upc>")?),
        "remove" => Command::Remove(single(word, rest, "<upc>")?),
        "delete" => Command::Delete(single(word, rest, "<upc>")?),
        "clear" => Command::Clear,
        "cart" => Command::Cart,
        "search" => Command::Search(text(word, rest, "<query>")?),
        "login" => {
            let (username, password) = pair(word, rest, "<user> <password>")?;
            Command::Login { username, password }
        }
        "logout" => Command::Logout,
        "price" => {
            let (product_id, amount) = pair(word, rest, "<product-id> <amount>")?;
            let amount = Money::parse(&amount)?;
            if amount.cents() < 0 {
                return Err(AppError::validation("Price cannot be negative"));
            }
            Command::Price { product_id, amount }
        }
        "drop" => Command::Drop(single(word, rest, "<product-id>")?),
        "image" => {
            let (product_id, url) = pair(word, rest, "<product-id> <url>")?;
            Command::Image { product_id, url }
        }
        "name" => Command::Name(text(word, rest, "<store name>")?),
        "theme" => Command::Theme(text(word, rest, "<name>")?),
        "camera" => match rest.to_lowercase().as_str() {
            "on" => Command::Camera(true),
            "off" => Command::Camera(false),
            _ => return Err(usage(word, "on|off")),
        },
        "prefs" => Command::Prefs,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => {
            return Err(AppError::validation(format!(
                "Unknown command '{}'. Type 'help' for a list.",
                word
            )))
        }
    };

    Ok(Some(command))
}

fn usage(word: &str, args: &str) -> AppError {
    AppError::validation(format!("Usage: {} {}", word, args))
}

fn text(word: &str, rest: &str, args: &str) -> AppResult<String> {
    if rest.is_empty() {
        return Err(usage(word, args));
    }
    Ok(rest.to_string())
}

fn single(word: &str, rest: &str, args: &str) -> AppResult<String> {
    if rest.is_empty() || rest.contains(char::is_whitespace) {
        return Err(usage(word, args));
    }
    Ok(rest.to_string())
}

fn pair(word: &str, rest: &str, args: &str) -> AppResult<(String, String)> {
    let mut parts = rest.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(first), Some(second), None) => Ok((first.to_string(), second.to_string())),
        _ => Err(usage(word, args)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn cmd(line: &str) -> Command {
        parse(line).unwrap().unwrap()
    }

    #[test]
    fn test_bare_digits_are_a_scan() {
        assert_eq!(cmd("012000001536"), Command::Scan("012000001536".into()));
        assert_eq!(cmd("  scan 0123 "), Command::Scan("0123".into()));
        assert_eq!(parse("   ").unwrap(), None);
    }

    #[test]
    fn test_cart_commands() {
        assert_eq!(cmd("remove 1"), Command::Remove("1".into()));
        assert_eq!(cmd("DELETE 1"), Command::Delete("1".into()));
        assert_eq!(cmd("clear"), Command::Clear);
        assert_eq!(cmd("cart"), Command::Cart);
    }

    #[test]
    fn test_free_text_arguments_keep_spaces() {
        assert_eq!(cmd("search diet cola"), Command::Search("diet cola".into()));
        assert_eq!(
            cmd("name Izzy's  Corner Shop"),
            Command::Name("Izzy's  Corner Shop".into())
        );
    }

    #[test]
    fn test_admin_commands() {
        assert_eq!(
            cmd("login root root"),
            Command::Login {
                username: "root".into(),
                password: "root".into()
            }
        );
        assert_eq!(
            cmd("price p-1 $3.49"),
            Command::Price {
                product_id: "p-1".into(),
                amount: Money::from_cents(349)
            }
        );
        assert_eq!(
            cmd("image p-1 https://cdn.example.com/soda.png"),
            Command::Image {
                product_id: "p-1".into(),
                url: "https://cdn.example.com/soda.png".into()
            }
        );
        assert_eq!(cmd("drop p-1"), Command::Drop("p-1".into()));
    }

    #[test]
    fn test_settings_commands() {
        assert_eq!(cmd("theme teal"), Command::Theme("teal".into()));
        assert_eq!(cmd("camera ON"), Command::Camera(true));
        assert_eq!(cmd("camera off"), Command::Camera(false));
        assert_eq!(cmd("prefs"), Command::Prefs);
    }

    #[test]
    fn test_bad_input_is_validation_error() {
        for line in [
            "remove",
            "login root",
            "price p-1 cheap",
            "price p-1 -2",
            "camera maybe",
            "frobnicate",
        ] {
            let err = parse(line).unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationError, "{line}");
        }
    }
}
