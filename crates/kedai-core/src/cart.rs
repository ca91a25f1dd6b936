//! # Cart Aggregate
//!
//! The cashier's in-progress order: a mutable collection of lines with
//! quantity-driven add/update/remove semantics.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Cashier Action           Operation               Cart Change          │
//! │  ──────────────           ─────────               ───────────          │
//! │                                                                         │
//! │  Tap product ────────────► add_item() ──────────► qty += 1 or new line │
//! │                                                                         │
//! │  Tap +/- stepper ────────► update_quantity() ───► qty += delta         │
//! │                                                    (≤ 0 removes line)   │
//! │                                                                         │
//! │  Checkout succeeds ──────► clear() ─────────────► lines.clear()        │
//! │                                                                         │
//! │  Render totals panel ────► totals() ────────────► (read only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No Errors By Design
//! Every operation is a total function over the cart state. The cart is a
//! local, trusted, single-actor structure (one cashier, one session), so
//! invalid references are silently ignored rather than raised.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{compute_totals, Money, OrderTotals};
use crate::types::Product;

// =============================================================================
// Cart Line
// =============================================================================

/// A line in the cart.
///
/// ## Design Notes
/// - `product_id`: reference to the product (for the checkout snapshot)
/// - `name` / `unit_price`: frozen copies taken when the line was added,
///   so the cart displays consistent data even if the product record is
///   updated while the cashier is mid-order.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product ID (UUID).
    pub product_id: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Price in rupiah at time of adding (frozen).
    pub unit_price: i64,

    /// Quantity in cart, always >= 1 while the line exists.
    pub quantity: i64,

    /// When this line was first added.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Creates a new cart line from a product with quantity 1.
    pub fn from_product(product: &Product) -> Self {
        CartLine {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            quantity: 1,
            added_at: Utc::now(),
        }
    }

    /// Line total (unit price × quantity).
    pub fn line_total(&self) -> i64 {
        self.unit_price * self.quantity
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The cashier's cart.
///
/// ## Invariants
/// - Lines are unique by `product_id` (adding the same product again
///   increments its quantity)
/// - Quantity is always >= 1; a delta that drives it to <= 0 removes the
///   line entirely rather than persisting a non-positive quantity
#[derive(Debug, Clone, Serialize, Deserialize, Default, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Lines in the cart, in first-added order.
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds one unit of a product to the cart.
    ///
    /// ## Behavior
    /// - Product already in cart: increments its quantity by 1
    /// - Product not in cart: inserts a new line with quantity 1
    pub fn add_item(&mut self, product: &Product) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            line.quantity += 1;
            return;
        }

        self.lines.push(CartLine::from_product(product));
    }

    /// Applies a signed delta to a line's quantity.
    ///
    /// ## Behavior
    /// - Resulting quantity <= 0: the line is removed entirely
    /// - Unknown product id: no-op
    pub fn update_quantity(&mut self, product_id: &str, delta: i64) {
        let Some(idx) = self.lines.iter().position(|l| l.product_id == product_id) else {
            return;
        };

        let new_qty = self.lines[idx].quantity + delta;
        if new_qty <= 0 {
            self.lines.remove(idx);
        } else {
            self.lines[idx].quantity = new_qty;
        }
    }

    /// Empties the cart. Called after a successful checkout.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Computes subtotal, tax, and total over the current lines.
    pub fn totals(&self) -> OrderTotals {
        compute_totals(
            self.lines
                .iter()
                .map(|l| (Money::from_rupiah(l.unit_price), l.quantity)),
        )
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines in the cart.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    fn test_product(id: &str, name: &str, price: i64) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            category: Category::Coffee,
            price,
            image_url: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_add_item_new_line() {
        let mut cart = Cart::new();
        let espresso = test_product("p1", "Espresso", 20_000);

        cart.add_item(&espresso);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines[0].quantity, 1);
        assert_eq!(cart.lines[0].unit_price, 20_000);
    }

    #[test]
    fn test_add_same_product_increments_quantity() {
        let mut cart = Cart::new();
        let espresso = test_product("p1", "Espresso", 20_000);

        cart.add_item(&espresso);
        cart.add_item(&espresso);

        assert_eq!(cart.line_count(), 1); // still one line
        assert_eq!(cart.lines[0].quantity, 2);
        assert_eq!(cart.total_quantity(), 2);
    }

    #[test]
    fn test_update_quantity_applies_delta() {
        let mut cart = Cart::new();
        let latte = test_product("p2", "Latte", 25_000);

        cart.add_item(&latte);
        cart.update_quantity("p2", 2);

        assert_eq!(cart.lines[0].quantity, 3);

        cart.update_quantity("p2", -1);
        assert_eq!(cart.lines[0].quantity, 2);
    }

    #[test]
    fn test_update_quantity_to_zero_removes_line() {
        let mut cart = Cart::new();
        let latte = test_product("p2", "Latte", 25_000);

        cart.add_item(&latte);
        assert_eq!(cart.line_count(), 1);

        cart.update_quantity("p2", -1);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_below_zero_removes_line() {
        let mut cart = Cart::new();
        let latte = test_product("p2", "Latte", 25_000);

        cart.add_item(&latte);
        cart.add_item(&latte);

        cart.update_quantity("p2", -5);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_unknown_product_is_noop() {
        let mut cart = Cart::new();
        let latte = test_product("p2", "Latte", 25_000);
        cart.add_item(&latte);

        cart.update_quantity("does-not-exist", -1);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines[0].quantity, 1);
    }

    #[test]
    fn test_totals_delegate_to_calculator() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("p1", "Espresso", 20_000));
        cart.add_item(&test_product("p1", "Espresso", 20_000));

        let totals = cart.totals();
        assert_eq!(totals.subtotal.rupiah(), 40_000);
        assert_eq!(totals.tax.rupiah(), 4_400);
        assert_eq!(totals.total.rupiah(), 44_400);
    }

    #[test]
    fn test_cart_snapshot_ignores_later_price_change() {
        let mut cart = Cart::new();
        let mut espresso = test_product("p1", "Espresso", 20_000);
        cart.add_item(&espresso);

        // Admin raises the price while the order is being rung up
        espresso.price = 99_000;

        assert_eq!(cart.lines[0].unit_price, 20_000);
        assert_eq!(cart.totals().subtotal.rupiah(), 20_000);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("p1", "Espresso", 20_000));
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.totals().total.rupiah(), 0);
    }
}
