//! # Cart Commands
//!
//! Scanning and cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐   scan    ┌──────────┐   clear / idle timeout            │
//! │  │  Empty   │──────────►│ In Cart  │──────────────────────┐            │
//! │  │  Cart    │◄──────────│          │                      │            │
//! │  └──────────┘  delete / └──────────┘                      │            │
//! │       ▲        remove       │  ▲ scan / remove            │            │
//! │       │                     └──┘                          │            │
//! │       └───────────────────────────────────────────────────┘            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Local, Utc};
use izzymart_core::{Cart, CartItem, CartTotals, Money};
use tracing::{debug, info};

use crate::error::AppResult;
use crate::state::Register;
use crate::terminal::{TerminalEnvironment, Tone};

/// Cart as shown after every cart command.
#[derive(Debug, Clone)]
pub struct CartResponse {
    pub items: Vec<CartLine>,
    pub totals: CartTotals,
    pub last_scanned: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CartLine {
    pub upc: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub line_total: Money,
    pub added_at: DateTime<Utc>,
}

impl From<&CartItem> for CartLine {
    fn from(item: &CartItem) -> Self {
        CartLine {
            upc: item.upc().to_string(),
            name: item.product.display_name().to_string(),
            quantity: item.quantity,
            unit_price: item.product.unit_price(),
            line_total: item.line_total(),
            added_at: item.timestamp,
        }
    }
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            items: cart.items().iter().map(CartLine::from).collect(),
            totals: CartTotals::from(cart),
            last_scanned: cart
                .last_scanned()
                .map(|p| p.display_name().to_string()),
        }
    }
}

impl CartResponse {
    /// Receipt-style listing under the store name.
    pub fn render(&self, term: &TerminalEnvironment, store_name: &str) -> String {
        let mut out = vec![term.paint(Tone::Primary, &format!("== {} ==", store_name))];

        if self.items.is_empty() {
            out.push("  (cart is empty)".to_string());
        }

        for line in &self.items {
            out.push(format!(
                "  {:>3} x {:<28} {:>10}  {}",
                line.quantity,
                line.name,
                line.line_total.to_string(),
                line.added_at.with_timezone(&Local).format("%H:%M"),
            ));
        }

        if let Some(last) = &self.last_scanned {
            out.push(term.paint(Tone::Secondary, &format!("  last scanned: {}", last)));
        }

        out.push(term.paint(
            Tone::Accent,
            &format!(
                "  {} items, {} lines    Total {}",
                self.totals.item_count, self.totals.line_count, self.totals.total
            ),
        ));

        out.join("\n")
    }
}

/// Looks up a UPC (cached lookup allowed) and adds one unit.
pub async fn scan(register: &Register, upc: &str) -> AppResult<CartResponse> {
    let product = register.api.get_product_by_upc(upc, true).await?;

    Ok(register.cart.with_cart_mut(|cart| {
        info!(
            session = %cart.id(),
            upc = %product.upc,
            name = %product.display_name(),
            "Scanned"
        );
        cart.add_item(product);
        CartResponse::from(&*cart)
    }))
}

/// Removes one unit of a UPC.
pub fn remove_from_cart(register: &Register, upc: &str) -> CartResponse {
    debug!(upc, "Removing one unit");
    register.cart.with_cart_mut(|cart| {
        cart.remove_item(upc);
        CartResponse::from(&*cart)
    })
}

/// Removes a UPC's whole line.
pub fn delete_from_cart(register: &Register, upc: &str) -> CartResponse {
    debug!(upc, "Deleting line");
    register.cart.with_cart_mut(|cart| {
        cart.delete_item(upc);
        CartResponse::from(&*cart)
    })
}

/// Empties the cart and starts a new session.
pub fn clear_cart(register: &Register) -> CartResponse {
    register.cart.with_cart_mut(|cart| {
        let ended = cart.id();
        cart.clear_cart();
        info!(session = %ended, next_session = %cart.id(), "Cart cleared");
        CartResponse::from(&*cart)
    })
}

pub fn get_cart(register: &Register) -> CartResponse {
    register.cart.with_cart(|cart| CartResponse::from(cart))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_register;
    use izzymart_core::Product;

    fn stocked() -> Register {
        let register = test_register();
        register.cart.with_cart_mut(|cart| {
            cart.add_item(Product::new("1").with_name("Cola").with_price(1.99));
            cart.add_item(Product::new("1").with_name("Cola").with_price(1.99));
            cart.add_item(Product::new("2").with_name("Chips").with_price(3.0));
        });
        register
    }

    #[test]
    fn test_response_mirrors_cart() {
        let response = get_cart(&stocked());

        assert_eq!(response.items.len(), 2);
        assert_eq!(response.items[0].quantity, 2);
        assert_eq!(response.items[0].line_total, Money::from_cents(398));
        assert_eq!(response.totals.total, Money::from_cents(698));
        assert_eq!(response.last_scanned.as_deref(), Some("Chips"));
    }

    #[test]
    fn test_remove_then_delete() {
        let register = stocked();

        let response = remove_from_cart(&register, "1");
        assert_eq!(response.items[0].quantity, 1);

        let response = delete_from_cart(&register, "2");
        assert_eq!(response.totals.line_count, 1);
        assert_eq!(response.totals.total, Money::from_cents(199));
    }

    #[test]
    fn test_clear_empties_cart() {
        let register = stocked();
        let session = register.cart.with_cart(|c| c.id());
        let response = clear_cart(&register);

        assert!(response.items.is_empty());
        assert!(response.last_scanned.is_none());
        assert!(register.cart.with_cart(|c| c.is_empty()));
        assert_ne!(register.cart.with_cart(|c| c.id()), session);
    }

    #[test]
    fn test_render_lists_lines_and_total() {
        let register = stocked();
        let text = get_cart(&register).render(&TerminalEnvironment::new(false), "IzzyMart");

        assert!(text.starts_with("== IzzyMart =="));
        assert!(text.contains("2 x Cola"));
        assert!(text.contains("$3.98"));
        assert!(text.contains("Total $6.98"));
    }
}
