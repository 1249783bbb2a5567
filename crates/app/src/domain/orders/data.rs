//! Order Data

use candela_core::orders::{OrderStatus, PaymentStatus};

/// Partial update applied to a stored order.
///
/// Unset fields are left alone; the repository bumps `updated_at` on every
/// applied patch.
#[derive(Debug, Clone, Default)]
pub struct OrderPatch {
    /// New fulfillment status, already validated by the state machine.
    pub status: Option<OrderStatus>,

    /// New payment status, already validated by the state machine.
    pub payment_status: Option<PaymentStatus>,

    /// Carrier tracking code to attach.
    pub tracking_code: Option<String>,

    /// Back-office notes to attach.
    pub notes: Option<String>,
}
