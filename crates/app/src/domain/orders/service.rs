//! Orders service.
//!
//! Guest checkout on the public side; listing, status transitions, and
//! fulfillment bookkeeping behind the admin gate. Successful transitions
//! are logged so they can be audited later.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use candela_core::{
    cart::Cart,
    checkout::{CheckoutDetails, build_order},
    money,
    orders::{OrderId, OrderNumber, OrderStatus, PaymentStatus},
    pricing::ShippingPolicy,
};

use crate::{
    auth::{SessionProvider, require_admin},
    domain::orders::{
        data::OrderPatch,
        errors::OrdersServiceError,
        records::OrderRecord,
        repository::OrdersRepository,
    },
    store::StoreError,
};

/// Additional insert attempts after an order-number collision.
const DEFAULT_NUMBER_RETRIES: u32 = 3;

pub struct StoreOrdersService {
    repository: Arc<dyn OrdersRepository>,
    session: Arc<dyn SessionProvider>,
    policy: ShippingPolicy,
    number_retries: u32,
}

impl StoreOrdersService {
    #[must_use]
    pub fn new(
        repository: Arc<dyn OrdersRepository>,
        session: Arc<dyn SessionProvider>,
        policy: ShippingPolicy,
    ) -> Self {
        Self {
            repository,
            session,
            policy,
            number_retries: DEFAULT_NUMBER_RETRIES,
        }
    }

    /// Overrides how many times a colliding order number is regenerated.
    #[must_use]
    pub fn with_number_retries(mut self, retries: u32) -> Self {
        self.number_retries = retries;
        self
    }
}

#[async_trait]
impl OrdersService for StoreOrdersService {
    async fn create_order(
        &self,
        cart: Cart,
        details: CheckoutDetails,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut attempt = 0;

        loop {
            // Rebuilding regenerates the order number; validation is cheap
            // and the cart is untouched either way.
            let order = build_order(&cart, &details, &self.policy)?;
            let record = OrderRecord::from_order(OrderId::generate(), order);

            match self.repository.insert_order(record).await {
                Ok(created) => {
                    tracing::info!(
                        order = %created.id,
                        number = %created.order_number,
                        total = %money::format_brl(created.total_amount),
                        "order created"
                    );
                    return Ok(created);
                }
                Err(StoreError::AlreadyExists) if attempt < self.number_retries => {
                    attempt += 1;
                    tracing::warn!(attempt, "order number collision, regenerating");
                }
                Err(error) => return Err(error.into()),
            }
        }
    }

    async fn get_order(&self, id: OrderId) -> Result<OrderRecord, OrdersServiceError> {
        self.repository
            .get_order(id)
            .await?
            .ok_or(OrdersServiceError::NotFound)
    }

    async fn find_by_number(
        &self,
        number: OrderNumber,
    ) -> Result<OrderRecord, OrdersServiceError> {
        self.repository
            .find_by_number(number)
            .await?
            .ok_or(OrdersServiceError::NotFound)
    }

    async fn list_orders(&self) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        require_admin(self.session.as_ref())?;

        let mut records = self.repository.list_orders().await?;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(records)
    }

    async fn update_status(
        &self,
        id: OrderId,
        to: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        require_admin(self.session.as_ref())?;

        let record = self
            .repository
            .get_order(id)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        let next = record.status.transition(to)?;

        let updated = self
            .repository
            .update_order(
                id,
                OrderPatch {
                    status: Some(next),
                    ..OrderPatch::default()
                },
            )
            .await?;

        tracing::info!(
            order = %id,
            from = %record.status,
            to = %next,
            "order status updated"
        );

        Ok(updated)
    }

    async fn update_payment_status(
        &self,
        id: OrderId,
        to: PaymentStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        require_admin(self.session.as_ref())?;

        let record = self
            .repository
            .get_order(id)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        let next = record.payment_status.transition(to)?;

        let updated = self
            .repository
            .update_order(
                id,
                OrderPatch {
                    payment_status: Some(next),
                    ..OrderPatch::default()
                },
            )
            .await?;

        tracing::info!(
            order = %id,
            from = %record.payment_status,
            to = %next,
            "payment status updated"
        );

        Ok(updated)
    }

    async fn set_tracking(
        &self,
        id: OrderId,
        tracking_code: String,
    ) -> Result<OrderRecord, OrdersServiceError> {
        require_admin(self.session.as_ref())?;

        let updated = self
            .repository
            .update_order(
                id,
                OrderPatch {
                    tracking_code: Some(tracking_code),
                    ..OrderPatch::default()
                },
            )
            .await?;

        Ok(updated)
    }

    async fn set_notes(
        &self,
        id: OrderId,
        notes: String,
    ) -> Result<OrderRecord, OrdersServiceError> {
        require_admin(self.session.as_ref())?;

        let updated = self
            .repository
            .update_order(
                id,
                OrderPatch {
                    notes: Some(notes),
                    ..OrderPatch::default()
                },
            )
            .await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Places a guest order from the cart and checkout input; returns the
    /// persisted record including its generated id. The caller's cart is
    /// never touched — it is cleared by the caller, and only after this
    /// returns `Ok`.
    async fn create_order(
        &self,
        cart: Cart,
        details: CheckoutDetails,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Fetches one order by id.
    async fn get_order(&self, id: OrderId) -> Result<OrderRecord, OrdersServiceError>;

    /// Fetches one order by its human-facing number (confirmation lookup).
    async fn find_by_number(
        &self,
        number: OrderNumber,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Every order, newest first. Admin only.
    async fn list_orders(&self) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Moves an order's fulfillment status. Admin only; guarded by the
    /// state machine, and the record is untouched when the move is invalid.
    async fn update_status(
        &self,
        id: OrderId,
        to: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Moves an order's payment status. Admin only.
    async fn update_payment_status(
        &self,
        id: OrderId,
        to: PaymentStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Attaches a carrier tracking code. Admin only.
    async fn set_tracking(
        &self,
        id: OrderId,
        tracking_code: String,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Attaches back-office notes. Admin only.
    async fn set_notes(
        &self,
        id: OrderId,
        notes: String,
    ) -> Result<OrderRecord, OrdersServiceError>;
}
