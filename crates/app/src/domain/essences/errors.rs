//! Essences service errors.

use thiserror::Error;

use candela_core::money::AmountError;

use crate::{auth::AuthError, store::StoreError};

#[derive(Debug, Error)]
pub enum EssencesServiceError {
    /// The addressed essence or association does not exist.
    #[error("essence not found")]
    NotFound,

    /// The essence is already attached to the product.
    #[error("essence already attached")]
    AlreadyAttached,

    /// The submitted price modifier failed boundary validation.
    #[error("invalid price modifier")]
    InvalidModifier(#[from] AmountError),

    /// The session may not perform this operation.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The store failed; the call is retryable.
    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for EssencesServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound => Self::NotFound,
            StoreError::AlreadyExists => Self::AlreadyAttached,
            other => Self::Store(other),
        }
    }
}
