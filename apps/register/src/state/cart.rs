//! # Cart State
//!
//! Shared handle to the register's single cart.
//!
//! ## Thread Safety
//! Uses `Arc<Mutex<Cart>>`: the command loop and the idle callback both
//! mutate the cart, and every cart operation is short.

use std::sync::{Arc, Mutex, PoisonError};

use izzymart_core::Cart;

#[derive(Debug, Clone, Default)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = cart_state.with_cart(|cart| CartTotals::from(cart));
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use izzymart_core::Product;

    #[test]
    fn test_clones_share_one_cart() {
        let state = CartState::new();
        let idle_handle = state.clone();

        state.with_cart_mut(|c| c.add_item(Product::new("1").with_price(1.0)));
        assert_eq!(idle_handle.with_cart(|c| c.item_count()), 1);

        idle_handle.with_cart_mut(|c| c.clear_cart());
        assert!(state.with_cart(|c| c.is_empty()));
    }
}
