//! Persistence collaborators.
//!
//! Repositories in the domain modules talk to stores only through these
//! seams: the shared [`StoreError`] taxonomy, the bundled in-memory
//! document collection, and the client-side key-value store used by the
//! cart.

use thiserror::Error;

pub mod local;
pub mod memory;

pub use local::{LocalStore, LocalStoreError, MemoryLocalStore};
pub use memory::MemoryCollection;

/// Failure taxonomy every repository maps its backend errors into.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The addressed record does not exist.
    #[error("record not found")]
    NotFound,

    /// A uniqueness constraint was violated.
    #[error("record already exists")]
    AlreadyExists,

    /// The store could not be reached or failed mid-operation. Retryable;
    /// no partial state was committed.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
