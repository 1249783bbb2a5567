//! Carts

pub mod errors;
pub mod store;

pub use errors::CartStoreError;
pub use store::{CART_STORAGE_KEY, CartStore};
