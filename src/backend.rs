use crate::errors::BackendError;
use crate::models::{ClickRow, CounterId};
use async_trait::async_trait;

/// Row-oriented remote store holding one `(id, count)` row per counter.
///
/// Implementations report failures as [`BackendError`]; a missing row on
/// [`RowStore::select_count`] must surface as [`BackendError::RowNotFound`] so the
/// counter store can create it.
#[async_trait]
pub trait RowStore: Send + Sync {
    /// Every row in the table, including ids the service does not know about.
    async fn select_all(&self) -> Result<Vec<ClickRow>, BackendError>;

    async fn select_count(&self, id: CounterId) -> Result<u64, BackendError>;

    async fn insert(&self, row: ClickRow) -> Result<(), BackendError>;

    async fn update_count(&self, id: CounterId, count: u64) -> Result<(), BackendError>;
}
