//! Catalog entries as the checkout engine sees them.
//!
//! Product lifecycle (creation, editing, deactivation) belongs to the
//! service layer; here a product is just a priced, read-only entry that can
//! be dropped into a cart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ids::Id;

/// Identifier for a catalog product.
pub type ProductId = Id<CatalogProduct>;

/// A read-only priced catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    /// Product identifier.
    pub id: ProductId,

    /// Display name, copied into cart lines.
    pub name: String,

    /// Current unit price.
    pub price: Decimal,

    /// Optional product image.
    pub image_url: Option<String>,

    /// Whether the product is currently offered.
    pub is_active: bool,
}
