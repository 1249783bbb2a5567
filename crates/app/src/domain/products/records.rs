//! Product Records

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use candela_core::catalog::{CatalogProduct, ProductId};

/// A persisted catalog product.
///
/// Deleting a product flips `is_active` instead of removing the row, so
/// historical orders keep a resolvable product reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// Store-assigned identifier.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Optional long description.
    pub description: Option<String>,

    /// Current unit price.
    pub price: Decimal,

    /// Optional product image.
    pub image_url: Option<String>,

    /// Whether the product is publicly offered.
    pub is_active: bool,

    /// When the product was created.
    pub created_at: Timestamp,

    /// Bumped on every successful mutation.
    pub updated_at: Timestamp,
}

impl ProductRecord {
    /// The read-only catalog view the checkout engine consumes.
    #[must_use]
    pub fn catalog_entry(&self) -> CatalogProduct {
        CatalogProduct {
            id: self.id,
            name: self.name.clone(),
            price: self.price,
            image_url: self.image_url.clone(),
            is_active: self.is_active,
        }
    }
}
