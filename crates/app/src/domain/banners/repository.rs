//! Banners Repository

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    domain::banners::{data::BannerUpdate, records::{BannerId, BannerRecord}},
    store::{MemoryCollection, StoreError},
};

/// Persistence seam for banners.
#[automock]
#[async_trait]
pub trait BannersRepository: Send + Sync {
    /// Stores a new banner.
    async fn insert_banner(&self, record: BannerRecord) -> Result<BannerRecord, StoreError>;

    /// Fetches a banner by id.
    async fn get_banner(&self, id: BannerId) -> Result<Option<BannerRecord>, StoreError>;

    /// Every stored banner, active or not, unordered.
    async fn list_banners(&self) -> Result<Vec<BannerRecord>, StoreError>;

    /// Applies an update to one banner, bumping `updated_at`.
    async fn update_banner(
        &self,
        id: BannerId,
        update: BannerUpdate,
    ) -> Result<BannerRecord, StoreError>;
}

/// Memory-backed [`BannersRepository`].
#[derive(Debug, Default)]
pub struct MemoryBannersRepository {
    banners: MemoryCollection<BannerRecord>,
}

impl MemoryBannersRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BannersRepository for MemoryBannersRepository {
    async fn insert_banner(&self, record: BannerRecord) -> Result<BannerRecord, StoreError> {
        self.banners.insert(record.id.into_uuid(), record).await
    }

    async fn get_banner(&self, id: BannerId) -> Result<Option<BannerRecord>, StoreError> {
        Ok(self.banners.get(id.into_uuid()).await)
    }

    async fn list_banners(&self) -> Result<Vec<BannerRecord>, StoreError> {
        Ok(self.banners.list().await)
    }

    async fn update_banner(
        &self,
        id: BannerId,
        update: BannerUpdate,
    ) -> Result<BannerRecord, StoreError> {
        self.banners
            .update(id.into_uuid(), |row| {
                if let Some(title) = update.title {
                    row.title = title;
                }
                if let Some(description) = update.description {
                    row.description = Some(description);
                }
                if let Some(image_url) = update.image_url {
                    row.image_url = Some(image_url);
                }
                if let Some(link) = update.link {
                    row.link = Some(link);
                }
                if let Some(display_order) = update.display_order {
                    row.display_order = display_order;
                }
                if let Some(is_active) = update.is_active {
                    row.is_active = is_active;
                }
                row.updated_at = Timestamp::now();
            })
            .await
    }
}
