//! In-memory document collections.
//!
//! The bundled store backend: one uuid-keyed collection per record type,
//! behind an async `RwLock`. Updates clone the row, apply the change, and
//! swap — a failed update never leaves a half-written record, matching the
//! single-record atomicity the order state machine relies on.

use rustc_hash::FxHashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::store::StoreError;

/// A uuid-keyed in-memory collection of records.
#[derive(Debug)]
pub struct MemoryCollection<R> {
    rows: RwLock<FxHashMap<Uuid, R>>,
}

impl<R: Clone> MemoryCollection<R> {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(FxHashMap::default()),
        }
    }

    /// Inserts a record under `id`, echoing it back.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyExists`] when the id is taken.
    pub async fn insert(&self, id: Uuid, row: R) -> Result<R, StoreError> {
        let mut rows = self.rows.write().await;

        if rows.contains_key(&id) {
            return Err(StoreError::AlreadyExists);
        }

        rows.insert(id, row.clone());

        Ok(row)
    }

    /// Inserts a record, also enforcing uniqueness of `key` across rows.
    ///
    /// The check and the insert happen under one write lock, so the
    /// uniqueness guarantee holds across concurrent inserts.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyExists`] when the id or key is taken.
    pub async fn insert_unique<K, F>(&self, id: Uuid, row: R, key: F) -> Result<R, StoreError>
    where
        K: PartialEq,
        F: Fn(&R) -> K,
    {
        let mut rows = self.rows.write().await;

        if rows.contains_key(&id) {
            return Err(StoreError::AlreadyExists);
        }

        let new_key = key(&row);
        if rows.values().any(|existing| key(existing) == new_key) {
            return Err(StoreError::AlreadyExists);
        }

        rows.insert(id, row.clone());

        Ok(row)
    }

    /// Fetches a record by id.
    pub async fn get(&self, id: Uuid) -> Option<R> {
        self.rows.read().await.get(&id).cloned()
    }

    /// Returns the first record matching the predicate.
    pub async fn find<P>(&self, predicate: P) -> Option<R>
    where
        P: Fn(&R) -> bool,
    {
        self.rows
            .read()
            .await
            .values()
            .find(|row| predicate(row))
            .cloned()
    }

    /// Snapshots every record. Ordering is unspecified; callers sort.
    pub async fn list(&self) -> Vec<R> {
        self.rows.read().await.values().cloned().collect()
    }

    /// Applies `apply` to the record under `id` and returns the new value.
    ///
    /// The closure runs against the live record under the write lock;
    /// single-record updates are atomic.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the id is unknown.
    pub async fn update<F>(&self, id: Uuid, apply: F) -> Result<R, StoreError>
    where
        F: FnOnce(&mut R),
    {
        let mut rows = self.rows.write().await;

        let Some(row) = rows.get_mut(&id) else {
            return Err(StoreError::NotFound);
        };

        apply(row);

        Ok(row.clone())
    }

    /// Removes the record under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the id is unknown.
    pub async fn remove(&self, id: Uuid) -> Result<(), StoreError> {
        self.rows
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }

    /// Removes every record matching the predicate, returning the count.
    pub async fn remove_where<P>(&self, predicate: P) -> usize
    where
        P: Fn(&R) -> bool,
    {
        let mut rows = self.rows.write().await;
        let before = rows.len();

        rows.retain(|_, row| !predicate(row));

        before - rows.len()
    }
}

impl<R: Clone> Default for MemoryCollection<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn insert_then_get_roundtrips() -> TestResult {
        let rows = MemoryCollection::new();
        let id = Uuid::now_v7();

        rows.insert(id, "candle".to_string()).await?;

        assert_eq!(rows.get(id).await.as_deref(), Some("candle"));

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_id_is_rejected() -> TestResult {
        let rows = MemoryCollection::new();
        let id = Uuid::now_v7();

        rows.insert(id, 1).await?;
        let result = rows.insert(id, 2).await;

        assert_eq!(result, Err(StoreError::AlreadyExists));
        assert_eq!(rows.get(id).await, Some(1), "first row survives");

        Ok(())
    }

    #[tokio::test]
    async fn unique_key_is_enforced_across_rows() -> TestResult {
        let rows = MemoryCollection::new();

        rows.insert_unique(Uuid::now_v7(), ("a", 1), |row| row.0)
            .await?;
        let result = rows
            .insert_unique(Uuid::now_v7(), ("a", 2), |row| row.0)
            .await;

        assert_eq!(result, Err(StoreError::AlreadyExists));

        Ok(())
    }

    #[tokio::test]
    async fn update_of_unknown_id_reports_not_found() {
        let rows: MemoryCollection<u32> = MemoryCollection::new();

        let result = rows.update(Uuid::now_v7(), |row| *row += 1).await;

        assert_eq!(result, Err(StoreError::NotFound));
    }

    #[tokio::test]
    async fn update_returns_the_new_value() -> TestResult {
        let rows = MemoryCollection::new();
        let id = Uuid::now_v7();

        rows.insert(id, 10).await?;
        let updated = rows.update(id, |row| *row += 5).await?;

        assert_eq!(updated, 15);

        Ok(())
    }

    #[tokio::test]
    async fn remove_where_deletes_matching_rows() -> TestResult {
        let rows = MemoryCollection::new();
        rows.insert(Uuid::now_v7(), 1).await?;
        rows.insert(Uuid::now_v7(), 2).await?;
        rows.insert(Uuid::now_v7(), 3).await?;

        let removed = rows.remove_where(|row| row % 2 == 1).await;

        assert_eq!(removed, 2);
        assert_eq!(rows.list().await, vec![2]);

        Ok(())
    }
}
