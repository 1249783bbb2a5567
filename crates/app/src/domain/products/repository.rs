//! Products Repository

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rust_decimal::Decimal;

use candela_core::catalog::ProductId;

use crate::{
    domain::products::records::ProductRecord,
    store::{MemoryCollection, StoreError},
};

/// Typed patch applied to a stored product; prices are already validated.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

/// Persistence seam for products.
#[automock]
#[async_trait]
pub trait ProductsRepository: Send + Sync {
    /// Stores a new product.
    async fn insert_product(&self, record: ProductRecord) -> Result<ProductRecord, StoreError>;

    /// Fetches a product by id.
    async fn get_product(&self, id: ProductId) -> Result<Option<ProductRecord>, StoreError>;

    /// Every stored product, active or not, unordered.
    async fn list_products(&self) -> Result<Vec<ProductRecord>, StoreError>;

    /// Applies a patch to one product, bumping `updated_at`.
    async fn update_product(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<ProductRecord, StoreError>;
}

/// Memory-backed [`ProductsRepository`].
#[derive(Debug, Default)]
pub struct MemoryProductsRepository {
    products: MemoryCollection<ProductRecord>,
}

impl MemoryProductsRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductsRepository for MemoryProductsRepository {
    async fn insert_product(&self, record: ProductRecord) -> Result<ProductRecord, StoreError> {
        self.products.insert(record.id.into_uuid(), record).await
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<ProductRecord>, StoreError> {
        Ok(self.products.get(id.into_uuid()).await)
    }

    async fn list_products(&self) -> Result<Vec<ProductRecord>, StoreError> {
        Ok(self.products.list().await)
    }

    async fn update_product(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<ProductRecord, StoreError> {
        self.products
            .update(id.into_uuid(), |row| {
                if let Some(name) = patch.name {
                    row.name = name;
                }
                if let Some(description) = patch.description {
                    row.description = Some(description);
                }
                if let Some(price) = patch.price {
                    row.price = price;
                }
                if let Some(image_url) = patch.image_url {
                    row.image_url = Some(image_url);
                }
                if let Some(is_active) = patch.is_active {
                    row.is_active = is_active;
                }
                row.updated_at = Timestamp::now();
            })
            .await
    }
}
