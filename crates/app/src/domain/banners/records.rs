//! Banner Records

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use candela_core::ids::Id;

/// Identifier for a banner.
pub type BannerId = Id<BannerRecord>;

/// A promotional banner shown on the storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerRecord {
    /// Store-assigned identifier.
    pub id: BannerId,

    /// Headline.
    pub title: String,

    /// Optional body copy.
    pub description: Option<String>,

    /// Optional banner image.
    pub image_url: Option<String>,

    /// Optional click-through target.
    pub link: Option<String>,

    /// Whether the banner is currently shown.
    pub is_active: bool,

    /// Position among active banners, ascending.
    pub display_order: i32,

    /// When the banner was created.
    pub created_at: Timestamp,

    /// Bumped on every successful mutation.
    pub updated_at: Timestamp,
}
