//! Shopping cart for a single anonymous session.
//!
//! The cart is plain data: an ordered list of product lines, serialized as a
//! bare JSON array so it can live in a client-side key-value store. All
//! mutation rules from the storefront live here; persistence and change
//! notification are layered on by the owning store.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogProduct, ProductId};

/// One product line in the cart.
///
/// `unit_price` is the price observed when the line was created; it is not
/// refreshed when the underlying product changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product this line refers to.
    pub product_id: ProductId,

    /// Product display name at the time of adding.
    pub name: String,

    /// Unit price at the time of adding.
    pub unit_price: Decimal,

    /// Number of units; always at least 1 while the line exists.
    pub quantity: u32,

    /// Optional product image for cart rendering.
    pub image_url: Option<String>,
}

/// The cart itself: an ordered collection of lines, one per product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` units of a product.
    ///
    /// If the product is already in the cart its quantity is incremented;
    /// otherwise a new line is appended. A quantity of zero is a silent
    /// no-op.
    pub fn add_item(&mut self, product: &CatalogProduct, quantity: u32) {
        if quantity == 0 {
            return;
        }

        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.product_id == product.id)
        {
            item.quantity = item.quantity.saturating_add(quantity);
            return;
        }

        self.items.push(CartItem {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            quantity,
            image_url: product.image_url.clone(),
        });
    }

    /// Sets the quantity for a product line.
    ///
    /// A quantity of zero removes the line, so decrementing below one
    /// deletes the entry. Unknown products are ignored.
    pub fn update_quantity(&mut self, product: ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove_item(product);
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|item| item.product_id == product) {
            item.quantity = quantity;
        }
    }

    /// Removes a product line; no-op when absent.
    pub fn remove_item(&mut self, product: ProductId) {
        self.items.retain(|item| item.product_id != product);
    }

    /// Empties the cart. Idempotent.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// The cart lines, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of distinct product lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all lines — what a cart badge displays.
    #[must_use]
    pub fn total_units(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn product(name: &str, price: &str) -> CatalogProduct {
        CatalogProduct {
            id: ProductId::generate(),
            name: name.to_string(),
            price: price.parse().unwrap_or_default(),
            image_url: None,
            is_active: true,
        }
    }

    #[test]
    fn adding_new_product_appends_line() {
        let mut cart = Cart::new();
        let candle = product("Lavender Candle", "30.00");

        cart.add_item(&candle, 2);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_units(), 2);
    }

    #[test]
    fn adding_same_product_increments_quantity() {
        let mut cart = Cart::new();
        let candle = product("Lavender Candle", "30.00");

        cart.add_item(&candle, 1);
        cart.add_item(&candle, 3);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_units(), 4);
    }

    #[test]
    fn adding_zero_quantity_is_a_no_op() {
        let mut cart = Cart::new();
        let candle = product("Lavender Candle", "30.00");

        cart.add_item(&candle, 0);

        assert!(cart.is_empty());
    }

    #[test]
    fn update_quantity_to_zero_removes_line() {
        let mut cart = Cart::new();
        let candle = product("Lavender Candle", "30.00");

        cart.add_item(&candle, 2);
        cart.update_quantity(candle.id, 0);

        assert!(cart.is_empty(), "quantity zero must delete the entry");
    }

    #[test]
    fn update_quantity_sets_new_value() {
        let mut cart = Cart::new();
        let candle = product("Lavender Candle", "30.00");

        cart.add_item(&candle, 2);
        cart.update_quantity(candle.id, 5);

        assert_eq!(cart.total_units(), 5);
    }

    #[test]
    fn update_quantity_for_unknown_product_is_ignored() {
        let mut cart = Cart::new();
        let candle = product("Lavender Candle", "30.00");

        cart.add_item(&candle, 2);
        cart.update_quantity(ProductId::generate(), 7);

        assert_eq!(cart.total_units(), 2);
    }

    #[test]
    fn remove_item_is_a_no_op_when_absent() {
        let mut cart = Cart::new();

        cart.remove_item(ProductId::generate());

        assert!(cart.is_empty());
    }

    #[test]
    fn clear_twice_leaves_cart_empty_both_times() {
        let mut cart = Cart::new();
        let candle = product("Lavender Candle", "30.00");

        cart.add_item(&candle, 2);
        cart.clear();
        assert!(cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn serializes_as_bare_list() -> TestResult {
        let mut cart = Cart::new();
        let candle = product("Lavender Candle", "30.00");
        cart.add_item(&candle, 1);

        let json = serde_json::to_string(&cart)?;

        assert!(json.starts_with('['), "cart persists as a list: {json}");

        let restored: Cart = serde_json::from_str(&json)?;
        assert_eq!(restored, cart);

        Ok(())
    }
}
