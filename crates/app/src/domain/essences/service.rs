//! Essences service.
//!
//! Scent metadata for the catalog: admin CRUD over essences plus the
//! product associations that carry a price modifier. Unlike products,
//! deleting an essence removes it outright — nothing historical refers
//! back to it.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rust_decimal::Decimal;

use candela_core::{catalog::ProductId, money};

use crate::{
    auth::{SessionProvider, require_admin},
    domain::essences::{
        data::{EssenceUpdate, NewEssence},
        errors::EssencesServiceError,
        records::{EssenceId, EssenceRecord, ProductEssence},
        repository::{EssencePatch, EssencesRepository},
    },
};

pub struct StoreEssencesService {
    repository: Arc<dyn EssencesRepository>,
    session: Arc<dyn SessionProvider>,
}

impl StoreEssencesService {
    #[must_use]
    pub fn new(repository: Arc<dyn EssencesRepository>, session: Arc<dyn SessionProvider>) -> Self {
        Self {
            repository,
            session,
        }
    }
}

#[async_trait]
impl EssencesService for StoreEssencesService {
    async fn list_essences(&self) -> Result<Vec<EssenceRecord>, EssencesServiceError> {
        let mut records = self.repository.list_essences().await?;
        records.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(records)
    }

    async fn create_essence(
        &self,
        essence: NewEssence,
    ) -> Result<EssenceRecord, EssencesServiceError> {
        require_admin(self.session.as_ref())?;

        let now = Timestamp::now();
        let record = EssenceRecord {
            id: EssenceId::generate(),
            name: essence.name,
            description: essence.description,
            image_url: essence.image_url,
            created_at: now,
            updated_at: now,
        };

        let created = self.repository.insert_essence(record).await?;

        tracing::info!(essence = %created.id, name = %created.name, "essence created");

        Ok(created)
    }

    async fn update_essence(
        &self,
        id: EssenceId,
        update: EssenceUpdate,
    ) -> Result<EssenceRecord, EssencesServiceError> {
        require_admin(self.session.as_ref())?;

        let updated = self
            .repository
            .update_essence(
                id,
                EssencePatch {
                    name: update.name,
                    description: update.description,
                    image_url: update.image_url,
                },
            )
            .await?;

        Ok(updated)
    }

    async fn delete_essence(&self, id: EssenceId) -> Result<(), EssencesServiceError> {
        require_admin(self.session.as_ref())?;

        self.repository.remove_essence(id).await?;

        tracing::info!(essence = %id, "essence removed");

        Ok(())
    }

    async fn attach_essence(
        &self,
        product: ProductId,
        essence: EssenceId,
        price_modifier: String,
    ) -> Result<(), EssencesServiceError> {
        require_admin(self.session.as_ref())?;

        let modifier = money::parse_amount(&price_modifier)?;

        self.repository
            .get_essence(essence)
            .await?
            .ok_or(EssencesServiceError::NotFound)?;

        self.repository.attach(product, essence, modifier).await?;

        Ok(())
    }

    async fn detach_essence(
        &self,
        product: ProductId,
        essence: EssenceId,
    ) -> Result<(), EssencesServiceError> {
        require_admin(self.session.as_ref())?;

        self.repository.detach(product, essence).await?;

        Ok(())
    }

    async fn essences_for(
        &self,
        product: ProductId,
    ) -> Result<Vec<ProductEssence>, EssencesServiceError> {
        let associations = self.repository.associations_for(product).await?;

        let mut offered = Vec::with_capacity(associations.len());
        for association in associations {
            // Skip associations whose essence was removed underneath them.
            if let Some(essence) = self.repository.get_essence(association.essence_id).await? {
                offered.push(ProductEssence {
                    essence,
                    price_modifier: association.price_modifier,
                });
            }
        }

        offered.sort_by(|a, b| a.essence.name.cmp(&b.essence.name));

        Ok(offered)
    }

    async fn modifier_for(
        &self,
        product: ProductId,
        essence: EssenceId,
    ) -> Result<Decimal, EssencesServiceError> {
        let associations = self.repository.associations_for(product).await?;

        associations
            .into_iter()
            .find(|row| row.essence_id == essence)
            .map(|row| row.price_modifier)
            .ok_or(EssencesServiceError::NotFound)
    }
}

#[automock]
#[async_trait]
pub trait EssencesService: Send + Sync {
    /// Every essence, sorted by name. Public.
    async fn list_essences(&self) -> Result<Vec<EssenceRecord>, EssencesServiceError>;

    /// Creates an essence. Admin only.
    async fn create_essence(
        &self,
        essence: NewEssence,
    ) -> Result<EssenceRecord, EssencesServiceError>;

    /// Partially updates an essence. Admin only.
    async fn update_essence(
        &self,
        id: EssenceId,
        update: EssenceUpdate,
    ) -> Result<EssenceRecord, EssencesServiceError>;

    /// Removes an essence and its product associations. Admin only.
    async fn delete_essence(&self, id: EssenceId) -> Result<(), EssencesServiceError>;

    /// Offers an essence on a product with a price modifier. Admin only.
    async fn attach_essence(
        &self,
        product: ProductId,
        essence: EssenceId,
        price_modifier: String,
    ) -> Result<(), EssencesServiceError>;

    /// Withdraws an essence from a product. Admin only.
    async fn detach_essence(
        &self,
        product: ProductId,
        essence: EssenceId,
    ) -> Result<(), EssencesServiceError>;

    /// Essences offered on a product, with price modifiers. Public.
    async fn essences_for(
        &self,
        product: ProductId,
    ) -> Result<Vec<ProductEssence>, EssencesServiceError>;

    /// The price modifier for a product/essence pair, when offered. Public:
    /// storefronts add it to the product price before putting a line in the
    /// cart.
    async fn modifier_for(
        &self,
        product: ProductId,
        essence: EssenceId,
    ) -> Result<Decimal, EssencesServiceError>;
}
