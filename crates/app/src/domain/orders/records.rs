//! Order Records

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use candela_core::orders::{
    Address, Customer, Order, OrderId, OrderItem, OrderNumber, OrderStatus, PaymentStatus,
};

/// A persisted order: the immutable checkout snapshot plus the mutable
/// fulfillment fields the back office maintains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    /// Store-assigned identifier.
    pub id: OrderId,

    /// Unique human-facing reference.
    pub order_number: OrderNumber,

    /// Customer contact details.
    pub customer: Customer,

    /// Delivery address.
    pub address: Address,

    /// Snapshotted lines; immutable once stored.
    pub items: Vec<OrderItem>,

    /// Grand total fixed at build time.
    pub total_amount: Decimal,

    /// Shipping component of the total.
    pub shipping_cost: Decimal,

    /// Fulfillment status.
    pub status: OrderStatus,

    /// Payment status.
    pub payment_status: PaymentStatus,

    /// Carrier tracking code, once shipped.
    pub tracking_code: Option<String>,

    /// Free-form back-office notes.
    pub notes: Option<String>,

    /// When the order was created.
    pub created_at: Timestamp,

    /// Bumped on every successful mutation.
    pub updated_at: Timestamp,
}

impl OrderRecord {
    /// Wraps a freshly built order snapshot for persistence.
    #[must_use]
    pub fn from_order(id: OrderId, order: Order) -> Self {
        Self {
            id,
            order_number: order.order_number,
            customer: order.customer,
            address: order.address,
            items: order.items,
            total_amount: order.total_amount,
            shipping_cost: order.shipping_cost,
            status: order.status,
            payment_status: order.payment_status,
            tracking_code: None,
            notes: None,
            created_at: order.created_at,
            updated_at: order.created_at,
        }
    }
}
