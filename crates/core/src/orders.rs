//! Orders: immutable checkout snapshots and the status state machine.
//!
//! An [`Order`] is created once, at checkout submission, and its monetary
//! fields are never recomputed. Only the fulfillment and payment statuses
//! move afterwards, and only along the transitions defined here.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use jiff::Timestamp;
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{cart::CartItem, catalog::ProductId, ids::Id};

/// Identifier for a stored order.
pub type OrderId = Id<Order>;

/// Human-facing unique order reference, assigned at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Generates a fresh order number: `ORD-<epoch-millis>-<suffix>`.
    ///
    /// The millisecond prefix keeps numbers human-sortable; the random
    /// four-digit suffix makes same-millisecond collisions unlikely. The
    /// store's uniqueness constraint remains the final arbiter — on a
    /// collision the caller regenerates and retries.
    #[must_use]
    pub fn generate() -> Self {
        let millis = Timestamp::now().as_millisecond();
        let suffix: u32 = rand::thread_rng().gen_range(0..10_000);

        Self(format!("ORD-{millis}-{suffix:04}"))
    }

    /// The order number as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for OrderNumber {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for OrderNumber {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Who placed the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Full name.
    pub name: String,

    /// Contact email.
    pub email: String,

    /// Optional phone / WhatsApp contact.
    pub phone: Option<String>,
}

/// Delivery address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Street name.
    pub street: String,

    /// Street number.
    pub number: String,

    /// Optional complement (apartment, unit).
    pub complement: Option<String>,

    /// City.
    pub city: String,

    /// Two-letter state code.
    pub state: String,

    /// Postal code.
    pub zip: String,
}

/// One line of an order — a snapshot of a cart line at build time.
///
/// Immutable once attached: later product price changes never alter a
/// stored order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Product the line refers to.
    pub product_id: ProductId,

    /// Units ordered.
    pub quantity: u32,

    /// Unit price fixed at build time.
    pub unit_price: Decimal,

    /// `unit_price × quantity`, fixed at build time.
    pub subtotal: Decimal,
}

impl OrderItem {
    /// Snapshots a cart line into an immutable order line.
    #[must_use]
    pub fn snapshot(item: &CartItem) -> Self {
        Self {
            product_id: item.product_id,
            quantity: item.quantity,
            unit_price: item.unit_price,
            subtotal: item.unit_price * Decimal::from(item.quantity),
        }
    }
}

/// An immutable order snapshot produced by checkout.
///
/// `total_amount == Σ item.subtotal + shipping_cost`, computed once at
/// build time and never implicitly recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique human-facing reference.
    pub order_number: OrderNumber,

    /// Customer contact details.
    pub customer: Customer,

    /// Delivery address.
    pub address: Address,

    /// Snapshotted lines.
    pub items: Vec<OrderItem>,

    /// Grand total at build time.
    pub total_amount: Decimal,

    /// Shipping component of the total.
    pub shipping_cost: Decimal,

    /// Fulfillment status.
    pub status: OrderStatus,

    /// Payment status, tracked separately from fulfillment.
    pub payment_status: PaymentStatus,

    /// When the order was built.
    pub created_at: Timestamp,
}

/// Fulfillment lifecycle.
///
/// `pending → processing → shipped → delivered`, with `cancelled`
/// reachable from every non-terminal state. `delivered` and `cancelled`
/// are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed, awaiting handling.
    Pending,
    /// Being prepared.
    Processing,
    /// Handed to the carrier.
    Shipped,
    /// Received by the customer. Terminal.
    Delivered,
    /// Called off before delivery. Terminal.
    Cancelled,
}

impl OrderStatus {
    /// The closed wire label for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether no further transitions are allowed from this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Whether `self → to` is an allowed move.
    #[must_use]
    pub fn can_transition(self, to: Self) -> bool {
        match (self, to) {
            (Self::Pending, Self::Processing)
            | (Self::Processing, Self::Shipped)
            | (Self::Shipped, Self::Delivered) => true,
            (from, Self::Cancelled) => !from.is_terminal(),
            _ => false,
        }
    }

    /// Performs the `self → to` transition.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTransition`] when the move is not allowed; the
    /// caller's record must be left untouched in that case.
    pub fn transition(self, to: Self) -> Result<Self, InvalidTransition<Self>> {
        if self.can_transition(to) {
            Ok(to)
        } else {
            Err(InvalidTransition { from: self, to })
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownStatusError(other.to_string())),
        }
    }
}

/// Payment lifecycle, orthogonal to fulfillment.
///
/// `pending → completed | failed`, `failed → completed` (retried payment),
/// `completed → refunded`. `refunded` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Awaiting payment.
    Pending,
    /// Payment captured.
    Completed,
    /// Payment attempt failed.
    Failed,
    /// Captured payment returned. Terminal.
    Refunded,
}

impl PaymentStatus {
    /// The closed wire label for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
        }
    }

    /// Whether no further transitions are allowed from this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Refunded)
    }

    /// Whether `self → to` is an allowed move.
    #[must_use]
    pub fn can_transition(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Pending, Self::Completed | Self::Failed)
                | (Self::Failed, Self::Completed)
                | (Self::Completed, Self::Refunded)
        )
    }

    /// Performs the `self → to` transition.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTransition`] when the move is not allowed.
    pub fn transition(self, to: Self) -> Result<Self, InvalidTransition<Self>> {
        if self.can_transition(to) {
            Ok(to)
        } else {
            Err(InvalidTransition { from: self, to })
        }
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = UnknownStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            "refunded" => Ok(Self::Refunded),
            other => Err(UnknownStatusError(other.to_string())),
        }
    }
}

/// A status label outside the closed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized status label `{0}`")]
pub struct UnknownStatusError(pub String);

/// A disallowed state-machine move; the guarded record stays unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid transition from `{from}` to `{to}`")]
pub struct InvalidTransition<S: Display + fmt::Debug> {
    /// Status the record was in.
    pub from: S,

    /// Status that was requested.
    pub to: S,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn forward_path_is_allowed() -> TestResult {
        let status = OrderStatus::Pending
            .transition(OrderStatus::Processing)?
            .transition(OrderStatus::Shipped)?
            .transition(OrderStatus::Delivered)?;

        assert_eq!(status, OrderStatus::Delivered);

        Ok(())
    }

    #[test]
    fn cancel_is_allowed_from_any_non_terminal_state() {
        for from in [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Shipped,
        ] {
            assert!(
                from.can_transition(OrderStatus::Cancelled),
                "{from} should be cancellable"
            );
        }
    }

    #[test]
    fn terminal_states_allow_nothing() {
        for from in [OrderStatus::Delivered, OrderStatus::Cancelled] {
            for to in [
                OrderStatus::Pending,
                OrderStatus::Processing,
                OrderStatus::Shipped,
                OrderStatus::Delivered,
                OrderStatus::Cancelled,
            ] {
                assert!(
                    !from.can_transition(to),
                    "{from} is terminal but allowed {to}"
                );
            }
        }
    }

    #[test]
    fn skipping_a_stage_is_rejected() {
        let result = OrderStatus::Pending.transition(OrderStatus::Shipped);

        assert_eq!(
            result,
            Err(InvalidTransition {
                from: OrderStatus::Pending,
                to: OrderStatus::Shipped,
            })
        );
    }

    #[test]
    fn self_transition_is_rejected() {
        assert!(OrderStatus::Pending.transition(OrderStatus::Pending).is_err());
    }

    #[test]
    fn unknown_label_is_rejected() {
        let result: Result<OrderStatus, _> = "paid".parse();

        assert_eq!(result, Err(UnknownStatusError("paid".to_string())));
    }

    #[test]
    fn labels_roundtrip() -> TestResult {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>()?, status);
        }

        Ok(())
    }

    #[test]
    fn payment_retry_after_failure_is_allowed() -> TestResult {
        let status = PaymentStatus::Pending
            .transition(PaymentStatus::Failed)?
            .transition(PaymentStatus::Completed)?;

        assert_eq!(status, PaymentStatus::Completed);

        Ok(())
    }

    #[test]
    fn refund_requires_completed_payment() {
        assert!(PaymentStatus::Pending.transition(PaymentStatus::Refunded).is_err());
        assert!(PaymentStatus::Completed.transition(PaymentStatus::Refunded).is_ok());
    }

    #[test]
    fn refunded_is_terminal() {
        for to in [
            PaymentStatus::Pending,
            PaymentStatus::Completed,
            PaymentStatus::Failed,
        ] {
            assert!(!PaymentStatus::Refunded.can_transition(to), "refunded is terminal");
        }
    }

    #[test]
    fn generated_numbers_carry_the_prefix() {
        let number = OrderNumber::generate();

        assert!(
            number.as_str().starts_with("ORD-"),
            "got {number}"
        );
    }

    #[test]
    fn generated_numbers_differ() {
        // Same millisecond is likely here; the random suffix must still
        // separate them (1 in 10_000 flake odds accepted).
        let a = OrderNumber::generate();
        let b = OrderNumber::generate();

        assert_ne!(a, b, "suffix should separate same-millisecond numbers");
    }

    #[test]
    fn snapshot_fixes_line_subtotal() {
        let item = CartItem {
            product_id: ProductId::generate(),
            name: "Vanilla Candle".to_string(),
            unit_price: Decimal::new(30_00, 2),
            quantity: 2,
            image_url: None,
        };

        let line = OrderItem::snapshot(&item);

        assert_eq!(line.subtotal, Decimal::new(60_00, 2));
    }
}
