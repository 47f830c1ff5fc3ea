use uuid::Uuid;

use crate::backend::{AccessToken, Query, QueryApi};
use crate::common::BackendError;
use crate::models::{Record, Searchable};

/// Reads whole collections on behalf of one signed-in administrator.
pub struct CollectionBrowser<'a, Q: ?Sized> {
    query: &'a Q,
    token: &'a AccessToken,
}

impl<'a, Q: QueryApi + ?Sized> CollectionBrowser<'a, Q> {
    pub fn new(query: &'a Q, token: &'a AccessToken) -> Self {
        Self { query, token }
    }

    /// All rows of `T::COLLECTION`, ordered by `order_by`.
    ///
    /// A failed fetch is an error, never an empty list.
    pub async fn list<T: Record>(
        &self,
        order_by: &str,
        descending: bool,
    ) -> Result<Vec<T>, BackendError> {
        let query = Query::table(T::COLLECTION).order(order_by, descending);
        let rows = self.query.select(self.token, &query).await?;

        rows.into_iter()
            .map(|row| {
                serde_json::from_value::<T>(row).map_err(|e| {
                    BackendError::Decode(format!(
                        "{} row: {e}",
                        T::COLLECTION
                    ))
                })
            })
            .collect()
    }

    pub async fn newest_first<T: Record>(
        &self,
    ) -> Result<Vec<T>, BackendError> {
        self.list("created_at", true).await
    }
}

/// Records matching `term`, in their original order.
pub fn filter<'r, T: Searchable>(records: &'r [T], term: &str) -> Vec<&'r T> {
    records.iter().filter(|r| r.matches(term)).collect()
}

/// The view-local copy of a collection.
///
/// Only ever changed from authoritative backend responses: a fresh listing,
/// a record echoed back by an insert, or a confirmed delete.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordCache<T> {
    records: Vec<T>,
}

impl<T: Record> RecordCache<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.records.iter().any(|r| r.id() == id)
    }

    pub fn get(&self, id: Uuid) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Puts a record the store just created at the head of the list.
    pub fn reconcile_created(&mut self, record: T) -> &T {
        self.records.insert(0, record);
        &self.records[0]
    }

    /// Drops the record the store just deleted. Returns whether it was cached.
    pub fn reconcile_deleted(&mut self, id: Uuid) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id() != id);
        self.records.len() != before
    }
}

impl<T: Record + Searchable> RecordCache<T> {
    pub fn filtered(&self, term: &str) -> Vec<&T> {
        filter(&self.records, term)
    }
}

impl<T: Record> Default for RecordCache<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
