//! Orders Repository

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use candela_core::orders::{OrderId, OrderNumber};

use crate::{
    domain::orders::{data::OrderPatch, records::OrderRecord},
    store::{MemoryCollection, StoreError},
};

/// Persistence seam for orders.
///
/// `update_order` must be atomic at the record level: a failed update
/// leaves the prior record intact. Implementations bump `updated_at` when
/// a patch is applied.
#[automock]
#[async_trait]
pub trait OrdersRepository: Send + Sync {
    /// Stores a new order, enforcing `order_number` uniqueness.
    async fn insert_order(&self, record: OrderRecord) -> Result<OrderRecord, StoreError>;

    /// Fetches an order by id.
    async fn get_order(&self, id: OrderId) -> Result<Option<OrderRecord>, StoreError>;

    /// Fetches an order by its human-facing number.
    async fn find_by_number(&self, number: OrderNumber)
    -> Result<Option<OrderRecord>, StoreError>;

    /// Every stored order, unordered.
    async fn list_orders(&self) -> Result<Vec<OrderRecord>, StoreError>;

    /// Applies a patch to one order.
    async fn update_order(
        &self,
        id: OrderId,
        patch: OrderPatch,
    ) -> Result<OrderRecord, StoreError>;
}

/// Memory-backed [`OrdersRepository`].
#[derive(Debug, Default)]
pub struct MemoryOrdersRepository {
    orders: MemoryCollection<OrderRecord>,
}

impl MemoryOrdersRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrdersRepository for MemoryOrdersRepository {
    async fn insert_order(&self, record: OrderRecord) -> Result<OrderRecord, StoreError> {
        self.orders
            .insert_unique(record.id.into_uuid(), record, |row| {
                row.order_number.clone()
            })
            .await
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<OrderRecord>, StoreError> {
        Ok(self.orders.get(id.into_uuid()).await)
    }

    async fn find_by_number(
        &self,
        number: OrderNumber,
    ) -> Result<Option<OrderRecord>, StoreError> {
        Ok(self.orders.find(|row| row.order_number == number).await)
    }

    async fn list_orders(&self) -> Result<Vec<OrderRecord>, StoreError> {
        Ok(self.orders.list().await)
    }

    async fn update_order(
        &self,
        id: OrderId,
        patch: OrderPatch,
    ) -> Result<OrderRecord, StoreError> {
        self.orders
            .update(id.into_uuid(), |row| {
                if let Some(status) = patch.status {
                    row.status = status;
                }
                if let Some(payment_status) = patch.payment_status {
                    row.payment_status = payment_status;
                }
                if let Some(tracking_code) = patch.tracking_code {
                    row.tracking_code = Some(tracking_code);
                }
                if let Some(notes) = patch.notes {
                    row.notes = Some(notes);
                }
                row.updated_at = Timestamp::now();
            })
            .await
    }
}
