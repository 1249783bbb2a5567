//! Product Data

/// Input for creating a product.
///
/// The price arrives as a decimal string and is validated at the service
/// boundary before anything is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    /// Display name.
    pub name: String,

    /// Optional long description.
    pub description: Option<String>,

    /// Unit price as a decimal string (`"30.00"`).
    pub price: String,

    /// Optional product image.
    pub image_url: Option<String>,
}

/// Partial update for a product; unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    /// New display name.
    pub name: Option<String>,

    /// New description.
    pub description: Option<String>,

    /// New unit price as a decimal string.
    pub price: Option<String>,

    /// New product image.
    pub image_url: Option<String>,
}
