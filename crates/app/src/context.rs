//! App Context
//!
//! Explicit wiring of every service from configuration plus a session
//! provider — no module-level singletons, so every component can be handed
//! a test double instead.

use std::sync::Arc;

use thiserror::Error;

use candela_core::money::AmountError;

use crate::{
    auth::SessionProvider,
    config::AppConfig,
    domain::{
        banners::{BannersService, StoreBannersService, repository::MemoryBannersRepository},
        essences::{EssencesService, StoreEssencesService, repository::MemoryEssencesRepository},
        orders::{OrdersService, StoreOrdersService, repository::MemoryOrdersRepository},
        products::{ProductsService, StoreProductsService, repository::MemoryProductsRepository},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("invalid shipping configuration")]
    Shipping(#[from] AmountError),
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub essences: Arc<dyn EssencesService>,
    pub banners: Arc<dyn BannersService>,
    pub orders: Arc<dyn OrdersService>,
}

impl AppContext {
    /// Build an application context over the bundled in-memory store.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured shipping amounts are invalid.
    pub fn in_memory(
        config: &AppConfig,
        session: Arc<dyn SessionProvider>,
    ) -> Result<Self, AppInitError> {
        let policy = config.shipping_policy()?;

        Ok(Self {
            products: Arc::new(StoreProductsService::new(
                Arc::new(MemoryProductsRepository::new()),
                session.clone(),
            )),
            essences: Arc::new(StoreEssencesService::new(
                Arc::new(MemoryEssencesRepository::new()),
                session.clone(),
            )),
            banners: Arc::new(StoreBannersService::new(
                Arc::new(MemoryBannersRepository::new()),
                session.clone(),
            )),
            orders: Arc::new(
                StoreOrdersService::new(
                    Arc::new(MemoryOrdersRepository::new()),
                    session,
                    policy,
                )
                .with_number_retries(config.order_number_retries),
            ),
        })
    }
}
