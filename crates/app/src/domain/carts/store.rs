//! Client cart store.
//!
//! One anonymous session's cart, persisted synchronously through the
//! client-side key-value collaborator after every mutation, with change
//! notifications so observers (the cart badge) re-read.
//!
//! Concurrent tabs over the same storage race on writes; last write wins.
//! That is the accepted consistency model for a single-visitor cart, not a
//! defect — [`CartStore::reload`] is the cross-tab catch-up path.

use std::{fmt, sync::Arc};

use candela_core::{
    cart::Cart,
    catalog::{CatalogProduct, ProductId},
};

use crate::{domain::carts::errors::CartStoreError, store::LocalStore};

/// Key the serialized cart lives under in the client store.
pub const CART_STORAGE_KEY: &str = "cart";

type Listener = Box<dyn Fn(&Cart) + Send + Sync>;

pub struct CartStore {
    storage: Arc<dyn LocalStore>,
    cart: Cart,
    listeners: Vec<Listener>,
}

impl CartStore {
    /// Opens the cart over a client store, loading any persisted state.
    ///
    /// A corrupt payload is treated as an empty cart rather than an error —
    /// a visitor with mangled storage can still shop.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError::Storage`] when the store cannot be read.
    pub fn open(storage: Arc<dyn LocalStore>) -> Result<Self, CartStoreError> {
        let cart = match storage.get(CART_STORAGE_KEY)? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_default(),
            None => Cart::default(),
        };

        Ok(Self {
            storage,
            cart,
            listeners: Vec::new(),
        })
    }

    /// The current cart contents.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Adds units of a product, persisting and notifying.
    ///
    /// A quantity of zero is a silent no-op, per the cart rules.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError`] when persisting fails.
    pub fn add_item(
        &mut self,
        product: &CatalogProduct,
        quantity: u32,
    ) -> Result<(), CartStoreError> {
        if quantity == 0 {
            return Ok(());
        }

        self.cart.add_item(product, quantity);
        self.persist()
    }

    /// Sets a line's quantity; zero removes the line.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError`] when persisting fails.
    pub fn update_quantity(
        &mut self,
        product: ProductId,
        quantity: u32,
    ) -> Result<(), CartStoreError> {
        self.cart.update_quantity(product, quantity);
        self.persist()
    }

    /// Removes a line; no-op when absent.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError`] when persisting fails.
    pub fn remove_item(&mut self, product: ProductId) -> Result<(), CartStoreError> {
        self.cart.remove_item(product);
        self.persist()
    }

    /// Empties the cart — the caller's move after a confirmed order.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError`] when persisting fails.
    pub fn clear(&mut self) -> Result<(), CartStoreError> {
        self.cart.clear();
        self.persist()
    }

    /// Registers a change observer, called after every persisted mutation.
    pub fn subscribe(&mut self, listener: impl Fn(&Cart) + Send + Sync + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Re-reads persisted state — the catch-up path after another tab wrote.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError::Storage`] when the store cannot be read.
    pub fn reload(&mut self) -> Result<(), CartStoreError> {
        self.cart = match self.storage.get(CART_STORAGE_KEY)? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_default(),
            None => Cart::default(),
        };

        Ok(())
    }

    fn persist(&self) -> Result<(), CartStoreError> {
        let raw = serde_json::to_string(&self.cart).map_err(CartStoreError::Encode)?;
        self.storage.set(CART_STORAGE_KEY, &raw)?;

        for listener in &self.listeners {
            listener(&self.cart);
        }

        Ok(())
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use testresult::TestResult;

    use crate::store::MemoryLocalStore;

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
    fn cart_survives_reopening_the_store() -> TestResult {
        let storage: Arc<MemoryLocalStore> = Arc::new(MemoryLocalStore::new());
        let candle = product("Lavender Candle", "30.00");

        {
            let mut cart = CartStore::open(storage.clone())?;
            cart.add_item(&candle, 2)?;
        }

        let reopened = CartStore::open(storage)?;

        assert_eq!(reopened.cart().total_units(), 2);
        assert_eq!(
            reopened.cart().items().first().map(|item| item.product_id),
            Some(candle.id)
        );

        Ok(())
    }

    #[test]
    fn every_mutation_notifies_subscribers() -> TestResult {
        let mut cart = CartStore::open(Arc::new(MemoryLocalStore::new()))?;
        let candle = product("Lavender Candle", "30.00");

        let seen = Arc::new(AtomicUsize::new(0));
        let counter = seen.clone();
        cart.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        cart.add_item(&candle, 1)?;
        cart.update_quantity(candle.id, 3)?;
        cart.remove_item(candle.id)?;
        cart.clear()?;

        assert_eq!(seen.load(Ordering::SeqCst), 4);

        Ok(())
    }

    #[test]
    fn subscriber_sees_the_badge_count() -> TestResult {
        let mut cart = CartStore::open(Arc::new(MemoryLocalStore::new()))?;
        let candle = product("Lavender Candle", "30.00");

        let badge = Arc::new(AtomicUsize::new(0));
        let counter = badge.clone();
        cart.subscribe(move |current| {
            counter.store(current.total_units() as usize, Ordering::SeqCst);
        });

        cart.add_item(&candle, 2)?;
        assert_eq!(badge.load(Ordering::SeqCst), 2);

        cart.update_quantity(candle.id, 5)?;
        assert_eq!(badge.load(Ordering::SeqCst), 5);

        Ok(())
    }

    #[test]
    fn zero_quantity_add_is_silent_and_unpersisted() -> TestResult {
        let storage: Arc<MemoryLocalStore> = Arc::new(MemoryLocalStore::new());
        let mut cart = CartStore::open(storage.clone())?;

        cart.add_item(&product("Candle", "30.00"), 0)?;

        assert!(cart.cart().is_empty());
        assert_eq!(storage.get(CART_STORAGE_KEY)?, None, "nothing was written");

        Ok(())
    }

    #[test]
    fn update_quantity_to_zero_equals_remove() -> TestResult {
        let mut cart = CartStore::open(Arc::new(MemoryLocalStore::new()))?;
        let candle = product("Candle", "30.00");

        cart.add_item(&candle, 2)?;
        cart.update_quantity(candle.id, 0)?;

        assert!(cart.cart().is_empty());

        Ok(())
    }

    #[test]
    fn corrupt_payload_loads_as_empty_cart() -> TestResult {
        let storage: Arc<MemoryLocalStore> = Arc::new(MemoryLocalStore::new());
        storage.set(CART_STORAGE_KEY, "{definitely not json")?;

        let cart = CartStore::open(storage)?;

        assert!(cart.cart().is_empty());

        Ok(())
    }

    #[test]
    fn reload_catches_up_with_another_tab() -> TestResult {
        let storage: Arc<MemoryLocalStore> = Arc::new(MemoryLocalStore::new());
        let candle = product("Candle", "30.00");

        let mut tab_a = CartStore::open(storage.clone())?;
        let mut tab_b = CartStore::open(storage)?;

        tab_a.add_item(&candle, 2)?;

        assert!(tab_b.cart().is_empty(), "tab B has not re-read yet");

        tab_b.reload()?;
        assert_eq!(tab_b.cart().total_units(), 2);

        Ok(())
    }

    #[test]
    fn last_write_wins_across_tabs() -> TestResult {
        let storage: Arc<MemoryLocalStore> = Arc::new(MemoryLocalStore::new());
        let candle = product("Candle", "30.00");
        let diffuser = product("Diffuser", "45.00");

        let mut tab_a = CartStore::open(storage.clone())?;
        let mut tab_b = CartStore::open(storage.clone())?;

        tab_a.add_item(&candle, 1)?;
        tab_b.add_item(&diffuser, 1)?;

        // Tab B wrote last without re-reading; its view is what persists.
        let fresh = CartStore::open(storage)?;
        assert_eq!(
            fresh.cart().items().first().map(|item| item.product_id),
            Some(diffuser.id)
        );
        assert_eq!(fresh.cart().len(), 1);

        Ok(())
    }

    #[test]
    fn clearing_twice_stays_empty_without_error() -> TestResult {
        let mut cart = CartStore::open(Arc::new(MemoryLocalStore::new()))?;

        cart.clear()?;
        cart.clear()?;

        assert!(cart.cart().is_empty());

        Ok(())
    }
}
