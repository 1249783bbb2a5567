//! Banners service errors.

use thiserror::Error;

use crate::{auth::AuthError, store::StoreError};

#[derive(Debug, Error)]
pub enum BannersServiceError {
    /// The addressed banner does not exist.
    #[error("banner not found")]
    NotFound,

    /// A banner with this id already exists.
    #[error("banner already exists")]
    AlreadyExists,

    /// The session may not perform this operation.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The store failed; the call is retryable.
    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for BannersServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound => Self::NotFound,
            StoreError::AlreadyExists => Self::AlreadyExists,
            other => Self::Store(other),
        }
    }
}
