//! Essences Repository

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rust_decimal::Decimal;
use uuid::Uuid;

use candela_core::catalog::ProductId;

use crate::{
    domain::essences::records::{EssenceId, EssenceRecord, ProductEssenceRecord},
    store::{MemoryCollection, StoreError},
};

/// Typed patch applied to a stored essence.
#[derive(Debug, Clone, Default)]
pub struct EssencePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Persistence seam for essences and their product associations.
#[automock]
#[async_trait]
pub trait EssencesRepository: Send + Sync {
    /// Stores a new essence.
    async fn insert_essence(&self, record: EssenceRecord) -> Result<EssenceRecord, StoreError>;

    /// Fetches an essence by id.
    async fn get_essence(&self, id: EssenceId) -> Result<Option<EssenceRecord>, StoreError>;

    /// Every stored essence, unordered.
    async fn list_essences(&self) -> Result<Vec<EssenceRecord>, StoreError>;

    /// Applies a patch to one essence, bumping `updated_at`.
    async fn update_essence(
        &self,
        id: EssenceId,
        patch: EssencePatch,
    ) -> Result<EssenceRecord, StoreError>;

    /// Removes an essence and every association that references it.
    async fn remove_essence(&self, id: EssenceId) -> Result<(), StoreError>;

    /// Associates an essence with a product; at most one row per pair.
    async fn attach(
        &self,
        product: ProductId,
        essence: EssenceId,
        price_modifier: Decimal,
    ) -> Result<ProductEssenceRecord, StoreError>;

    /// Removes the association for a pair.
    async fn detach(&self, product: ProductId, essence: EssenceId) -> Result<(), StoreError>;

    /// Associations for one product, unordered.
    async fn associations_for(
        &self,
        product: ProductId,
    ) -> Result<Vec<ProductEssenceRecord>, StoreError>;
}

/// Memory-backed [`EssencesRepository`].
#[derive(Debug, Default)]
pub struct MemoryEssencesRepository {
    essences: MemoryCollection<EssenceRecord>,
    associations: MemoryCollection<ProductEssenceRecord>,
}

impl MemoryEssencesRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EssencesRepository for MemoryEssencesRepository {
    async fn insert_essence(&self, record: EssenceRecord) -> Result<EssenceRecord, StoreError> {
        self.essences.insert(record.id.into_uuid(), record).await
    }

    async fn get_essence(&self, id: EssenceId) -> Result<Option<EssenceRecord>, StoreError> {
        Ok(self.essences.get(id.into_uuid()).await)
    }

    async fn list_essences(&self) -> Result<Vec<EssenceRecord>, StoreError> {
        Ok(self.essences.list().await)
    }

    async fn update_essence(
        &self,
        id: EssenceId,
        patch: EssencePatch,
    ) -> Result<EssenceRecord, StoreError> {
        self.essences
            .update(id.into_uuid(), |row| {
                if let Some(name) = patch.name {
                    row.name = name;
                }
                if let Some(description) = patch.description {
                    row.description = Some(description);
                }
                if let Some(image_url) = patch.image_url {
                    row.image_url = Some(image_url);
                }
                row.updated_at = Timestamp::now();
            })
            .await
    }

    async fn remove_essence(&self, id: EssenceId) -> Result<(), StoreError> {
        self.essences.remove(id.into_uuid()).await?;
        self.associations
            .remove_where(|row| row.essence_id == id)
            .await;

        Ok(())
    }

    async fn attach(
        &self,
        product: ProductId,
        essence: EssenceId,
        price_modifier: Decimal,
    ) -> Result<ProductEssenceRecord, StoreError> {
        let record = ProductEssenceRecord {
            id: Uuid::now_v7(),
            product_id: product,
            essence_id: essence,
            price_modifier,
            created_at: Timestamp::now(),
        };

        self.associations
            .insert_unique(record.id, record, |row| (row.product_id, row.essence_id))
            .await
    }

    async fn detach(&self, product: ProductId, essence: EssenceId) -> Result<(), StoreError> {
        let removed = self
            .associations
            .remove_where(|row| row.product_id == product && row.essence_id == essence)
            .await;

        if removed == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    async fn associations_for(
        &self,
        product: ProductId,
    ) -> Result<Vec<ProductEssenceRecord>, StoreError> {
        let mut rows = self.associations.list().await;
        rows.retain(|row| row.product_id == product);

        Ok(rows)
    }
}
