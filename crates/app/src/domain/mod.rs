//! Domain services.

pub mod banners;
pub mod carts;
pub mod essences;
pub mod orders;
pub mod products;
