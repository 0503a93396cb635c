//! # Cart
//!
//! The in-memory shopping cart: one line per UPC, derived totals, and the most
//! recently scanned product.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Operator Action          Operation               Line Change           │
//! │  ───────────────          ─────────               ───────────           │
//! │                                                                         │
//! │  Scan barcode ───────────► add_item(product) ───► qty += 1 or push     │
//! │                                                                         │
//! │  Minus button ───────────► remove_item(upc) ────► qty -= 1 or remove   │
//! │                                                                         │
//! │  Trash button ───────────► delete_item(upc) ────► remove               │
//! │                                                                         │
//! │  New customer ───────────► clear_cart() ────────► items.clear()        │
//! │                                                                         │
//! │  Totals (read) ──────────► total(), item_count()  (computed on read)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per UPC (adding the same UPC increases quantity)
//! - Every line present has quantity ≥ 1 (a would-be-zero line is removed)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;
use crate::types::Product;

/// A line in the shopping cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product as scanned (never mutated by the cart).
    pub product: Product,

    /// Quantity in cart, always ≥ 1.
    pub quantity: u32,

    /// When this line was created.
    pub timestamp: DateTime<Utc>,
}

impl CartItem {
    fn from_product(product: Product) -> Self {
        CartItem {
            product,
            quantity: 1,
            timestamp: Utc::now(),
        }
    }

    /// Barcode of this line.
    pub fn upc(&self) -> &str {
        &self.product.upc
    }

    /// Unit price × quantity. A missing price counts as zero.
    pub fn line_total(&self) -> Money {
        self.product.unit_price().multiply_quantity(self.quantity)
    }
}

/// The shopping cart.
///
/// Lines keep insertion order so the display matches scan order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    /// Session id; a new one is issued every time the cart is cleared.
    id: Uuid,

    items: Vec<CartItem>,

    last_scanned: Option<Product>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            id: Uuid::new_v4(),
            items: Vec::new(),
            last_scanned: None,
        }
    }

    /// Adds one unit of a product.
    ///
    /// ## Behavior
    /// - `last_scanned` becomes `product`
    /// - UPC already in cart: quantity + 1
    /// - UPC not in cart: new line with quantity 1, stamped now
    pub fn add_item(&mut self, product: Product) {
        self.last_scanned = Some(product.clone());

        if let Some(item) = self.items.iter_mut().find(|i| i.product.upc == product.upc) {
            item.quantity = item.quantity.saturating_add(1);
            return;
        }

        self.items.push(CartItem::from_product(product));
    }

    /// Removes one unit of the product with this UPC.
    ///
    /// Quantity 1 removes the whole line. Unknown UPCs are ignored.
    pub fn remove_item(&mut self, upc: &str) {
        let Some(index) = self.position(upc) else {
            return;
        };

        if self.items[index].quantity > 1 {
            self.items[index].quantity -= 1;
        } else {
            self.items.remove(index);
        }
    }

    /// Removes the line for this UPC regardless of quantity.
    pub fn delete_item(&mut self, upc: &str) {
        if let Some(index) = self.position(upc) {
            self.items.remove(index);
        }
    }

    /// Empties the cart and forgets the last scanned product.
    pub fn clear_cart(&mut self) {
        self.items.clear();
        self.last_scanned = None;
        self.id = Uuid::new_v4();
    }

    /// Sum of `unit price × quantity` over all lines.
    pub fn total(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Sum of quantities over all lines.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Number of distinct UPCs in the cart.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Lines in scan order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Looks up the line for a UPC.
    pub fn find(&self, upc: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product.upc == upc)
    }

    /// The product most recently passed to [`Cart::add_item`].
    pub fn last_scanned(&self) -> Option<&Product> {
        self.last_scanned.as_ref()
    }

    /// Current session id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, upc: &str) -> Option<usize> {
        self.items.iter().position(|i| i.product.upc == upc)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

/// Cart totals summary for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    pub line_count: usize,
    pub item_count: u32,
    pub total: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            item_count: cart.item_count(),
            total: cart.total(),
        }
    }
}
