//! Cart store errors.

use thiserror::Error;

use crate::store::LocalStoreError;

#[derive(Debug, Error)]
pub enum CartStoreError {
    /// The client-side store could not be read or written.
    #[error("cart storage failed")]
    Storage(#[from] LocalStoreError),

    /// The cart could not be encoded for persistence.
    #[error("cart payload could not be encoded")]
    Encode(#[source] serde_json::Error),
}
