//! Products service errors.

use thiserror::Error;

use candela_core::money::AmountError;

use crate::{auth::AuthError, store::StoreError};

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    /// The addressed product does not exist.
    #[error("product not found")]
    NotFound,

    /// A product with this id already exists.
    #[error("product already exists")]
    AlreadyExists,

    /// The submitted price failed boundary validation.
    #[error("invalid price value")]
    InvalidPrice(#[from] AmountError),

    /// The session may not perform this operation.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The store failed; the call is retryable.
    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for ProductsServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound => Self::NotFound,
            StoreError::AlreadyExists => Self::AlreadyExists,
            other => Self::Store(other),
        }
    }
}
