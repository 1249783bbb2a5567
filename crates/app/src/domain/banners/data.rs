//! Banner Data

/// Input for creating a banner.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBanner {
    /// Headline.
    pub title: String,

    /// Optional body copy.
    pub description: Option<String>,

    /// Optional banner image.
    pub image_url: Option<String>,

    /// Optional click-through target.
    pub link: Option<String>,

    /// Position among active banners; defaults to 0.
    pub display_order: i32,
}

/// Partial update for a banner; unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BannerUpdate {
    /// New headline.
    pub title: Option<String>,

    /// New body copy.
    pub description: Option<String>,

    /// New banner image.
    pub image_url: Option<String>,

    /// New click-through target.
    pub link: Option<String>,

    /// New position.
    pub display_order: Option<i32>,

    /// Show or hide the banner.
    pub is_active: Option<bool>,
}
