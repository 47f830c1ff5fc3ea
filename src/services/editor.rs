use uuid::Uuid;

use super::RecordCache;
use crate::backend::{AccessToken, Query, QueryApi};
use crate::common::{BackendError, EditorError};
use crate::models::{Draft, Record};

/// Answer to "are you sure?" before a destructive call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Declined,
}

impl Confirmation {
    /// Reads a submitted `confirm` value; only an explicit yes confirms.
    pub fn from_form(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("yes" | "true" | "1") => Self::Confirmed,
            _ => Self::Declined,
        }
    }
}

/// Create and delete for one collection, keeping a [`RecordCache`] in step.
pub struct RecordEditor<'a, Q: ?Sized> {
    query: &'a Q,
    token: &'a AccessToken,
}

impl<'a, Q: QueryApi + ?Sized> RecordEditor<'a, Q> {
    pub fn new(query: &'a Q, token: &'a AccessToken) -> Self {
        Self { query, token }
    }

    /// Validates `draft`, inserts it and prepends the stored row to `cache`.
    ///
    /// Invalid drafts never reach the backend. On any failure `cache` is left
    /// as it was.
    pub async fn create<'c, D: Draft>(
        &self,
        cache: &'c mut RecordCache<D::Record>,
        draft: &D,
    ) -> Result<&'c D::Record, EditorError> {
        let insert = draft.validate()?;
        let row = serde_json::to_value(&insert)?;

        let stored = self
            .query
            .insert(self.token, <D::Record as Record>::COLLECTION, &row)
            .await?;
        let record: D::Record =
            serde_json::from_value(stored).map_err(|e| {
                BackendError::Decode(format!(
                    "{} row: {e}",
                    <D::Record as Record>::COLLECTION
                ))
            })?;

        log::info!(
            "created {} record {}",
            <D::Record as Record>::COLLECTION,
            record.id()
        );
        Ok(cache.reconcile_created(record))
    }

    /// Deletes `id` once confirmed, then drops it from `cache`.
    pub async fn delete<T: Record>(
        &self,
        cache: &mut RecordCache<T>,
        id: Uuid,
        confirmation: Confirmation,
    ) -> Result<DeleteOutcome, EditorError> {
        if confirmation == Confirmation::Declined {
            return Ok(DeleteOutcome::Declined);
        }

        let query = Query::table(T::COLLECTION).eq("id", id.to_string());
        self.query.delete(self.token, &query).await?;

        cache.reconcile_deleted(id);
        log::info!("deleted {} record {}", T::COLLECTION, id);
        Ok(DeleteOutcome::Deleted)
    }
}
