//! Orders service errors.

use thiserror::Error;

use candela_core::{
    checkout::{CheckoutError, ValidationError},
    orders::{InvalidTransition, OrderStatus, PaymentStatus},
};

use crate::{auth::AuthError, store::StoreError};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    /// Checkout input failed validation; carries the full field map.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An order cannot be built from an empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// The addressed order does not exist.
    #[error("order not found")]
    NotFound,

    /// The requested fulfillment transition is not allowed.
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition<OrderStatus>),

    /// The requested payment transition is not allowed.
    #[error(transparent)]
    InvalidPayment(#[from] InvalidTransition<PaymentStatus>),

    /// The session may not perform this operation.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The store failed; nothing was committed and the call is retryable.
    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<CheckoutError> for OrdersServiceError {
    fn from(error: CheckoutError) -> Self {
        match error {
            CheckoutError::EmptyCart => Self::EmptyCart,
            CheckoutError::Validation(validation) => Self::Validation(validation),
        }
    }
}

impl From<StoreError> for OrdersServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound => Self::NotFound,
            other => Self::Store(other),
        }
    }
}
