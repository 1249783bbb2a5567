//! Essence Records

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use candela_core::{catalog::ProductId, ids::Id};

/// Identifier for an essence.
pub type EssenceId = Id<EssenceRecord>;

/// A scent attribute that can be attached to products.
///
/// Catalog metadata only — essences never appear in order snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EssenceRecord {
    /// Store-assigned identifier.
    pub id: EssenceId,

    /// Display name.
    pub name: String,

    /// Optional description.
    pub description: Option<String>,

    /// Optional illustration.
    pub image_url: Option<String>,

    /// When the essence was created.
    pub created_at: Timestamp,

    /// Bumped on every successful mutation.
    pub updated_at: Timestamp,
}

/// A product ↔ essence association with its price adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductEssenceRecord {
    /// Association row identifier.
    pub id: Uuid,

    /// Product side of the pair.
    pub product_id: ProductId,

    /// Essence side of the pair.
    pub essence_id: EssenceId,

    /// Added to the product's unit price when this essence is chosen.
    pub price_modifier: Decimal,

    /// When the association was created.
    pub created_at: Timestamp,
}

/// An essence offered on a product, with the resolved price adjustment.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductEssence {
    /// The essence itself.
    pub essence: EssenceRecord,

    /// Added to the product's unit price when chosen.
    pub price_modifier: Decimal,
}
