//! Banners service.
//!
//! Public storefront reads of active banners in display order; admin-gated
//! writes with soft deletion.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    auth::{SessionProvider, require_admin},
    domain::banners::{
        data::{BannerUpdate, NewBanner},
        errors::BannersServiceError,
        records::{BannerId, BannerRecord},
        repository::BannersRepository,
    },
};

pub struct StoreBannersService {
    repository: Arc<dyn BannersRepository>,
    session: Arc<dyn SessionProvider>,
}

impl StoreBannersService {
    #[must_use]
    pub fn new(repository: Arc<dyn BannersRepository>, session: Arc<dyn SessionProvider>) -> Self {
        Self {
            repository,
            session,
        }
    }
}

#[async_trait]
impl BannersService for StoreBannersService {
    async fn list_banners(&self) -> Result<Vec<BannerRecord>, BannersServiceError> {
        let mut records = self.repository.list_banners().await?;
        records.retain(|record| record.is_active);
        records.sort_by_key(|record| record.display_order);

        Ok(records)
    }

    async fn list_all_banners(&self) -> Result<Vec<BannerRecord>, BannersServiceError> {
        require_admin(self.session.as_ref())?;

        let mut records = self.repository.list_banners().await?;
        records.sort_by_key(|record| record.display_order);

        Ok(records)
    }

    async fn create_banner(
        &self,
        banner: NewBanner,
    ) -> Result<BannerRecord, BannersServiceError> {
        require_admin(self.session.as_ref())?;

        let now = Timestamp::now();
        let record = BannerRecord {
            id: BannerId::generate(),
            title: banner.title,
            description: banner.description,
            image_url: banner.image_url,
            link: banner.link,
            is_active: true,
            display_order: banner.display_order,
            created_at: now,
            updated_at: now,
        };

        let created = self.repository.insert_banner(record).await?;

        tracing::info!(banner = %created.id, title = %created.title, "banner created");

        Ok(created)
    }

    async fn update_banner(
        &self,
        id: BannerId,
        update: BannerUpdate,
    ) -> Result<BannerRecord, BannersServiceError> {
        require_admin(self.session.as_ref())?;

        let updated = self.repository.update_banner(id, update).await?;

        Ok(updated)
    }

    async fn delete_banner(&self, id: BannerId) -> Result<(), BannersServiceError> {
        require_admin(self.session.as_ref())?;

        self.repository
            .update_banner(
                id,
                BannerUpdate {
                    is_active: Some(false),
                    ..BannerUpdate::default()
                },
            )
            .await?;

        tracing::info!(banner = %id, "banner deactivated");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait BannersService: Send + Sync {
    /// Active banners in display order. Public.
    async fn list_banners(&self) -> Result<Vec<BannerRecord>, BannersServiceError>;

    /// Every banner including hidden ones. Admin only.
    async fn list_all_banners(&self) -> Result<Vec<BannerRecord>, BannersServiceError>;

    /// Creates a banner. Admin only.
    async fn create_banner(&self, banner: NewBanner)
    -> Result<BannerRecord, BannersServiceError>;

    /// Partially updates a banner. Admin only.
    async fn update_banner(
        &self,
        id: BannerId,
        update: BannerUpdate,
    ) -> Result<BannerRecord, BannersServiceError>;

    /// Soft-deletes a banner by hiding it. Admin only.
    async fn delete_banner(&self, id: BannerId) -> Result<(), BannersServiceError>;
}
