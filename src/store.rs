use crate::backend::RowStore;
use crate::errors::{BackendError, StoreError};
use crate::models::{ClickRow, CounterId, Counts, StoreMode};
use crate::storage::LocalStore;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Counts served from a remote row store, mirrored into a local cache.
pub struct RemoteStore {
    backend: Arc<dyn RowStore>,
    counts: Counts,
    cache: LocalStore,
}

/// The store of record for the session.
///
/// Chosen once by [`CounterStore::connect`]; a session that starts local stays local.
pub enum CounterStore {
    Remote(RemoteStore),
    Local(LocalStore),
}

impl CounterStore {
    /// Loads the initial snapshot, falling back to `cache` when the remote
    /// backend is absent or cannot be read.
    pub async fn connect(remote: Option<Arc<dyn RowStore>>, mut cache: LocalStore) -> Self {
        let Some(backend) = remote else {
            warn!("remote backend not configured, using local storage");
            return CounterStore::Local(cache);
        };

        match load_remote(backend.as_ref()).await {
            Ok(counts) => {
                info!(
                    square = counts.square,
                    circle = counts.circle,
                    "remote backend initialized"
                );
                cache.replace(counts).await;
                CounterStore::Remote(RemoteStore {
                    backend,
                    counts,
                    cache,
                })
            }
            Err(err) => Self::fall_back(&err, cache),
        }
    }

    /// Enters local mode after the remote backend failed to initialize.
    pub fn fall_back(err: &BackendError, cache: LocalStore) -> Self {
        error!(
            kind = err.kind(),
            "failed to initialize remote backend, falling back to local storage: {err}"
        );
        CounterStore::Local(cache)
    }

    pub fn mode(&self) -> StoreMode {
        match self {
            CounterStore::Remote(_) => StoreMode::Remote,
            CounterStore::Local(_) => StoreMode::Local,
        }
    }

    pub fn counts(&self) -> Counts {
        match self {
            CounterStore::Remote(remote) => remote.counts,
            CounterStore::Local(local) => local.counts(),
        }
    }

    pub fn get(&self, id: CounterId) -> u64 {
        self.counts().get(id)
    }

    pub async fn increment_named(&mut self, name: &str) -> Result<u64, StoreError> {
        let id = name.parse::<CounterId>()?;
        self.increment(id).await
    }

    pub async fn increment(&mut self, id: CounterId) -> Result<u64, StoreError> {
        let count = match self {
            CounterStore::Remote(remote) => remote.increment(id).await?,
            CounterStore::Local(local) => local.increment(id).await,
        };
        info!(counter = %id, count, "counter incremented");
        Ok(count)
    }

    pub async fn reset(&mut self) -> Result<Counts, StoreError> {
        match self {
            CounterStore::Remote(remote) => remote.reset().await?,
            CounterStore::Local(local) => local.reset().await,
        }
        info!("counts reset");
        Ok(self.counts())
    }
}

impl RemoteStore {
    async fn increment(&mut self, id: CounterId) -> Result<u64, StoreError> {
        let current = match self.backend.select_count(id).await {
            Ok(count) => count,
            Err(BackendError::RowNotFound) => {
                info!(counter = %id, "creating missing row");
                let row = ClickRow {
                    id: id.to_string(),
                    count: 1,
                };
                if let Err(err) = self.backend.insert(row).await {
                    error!(counter = %id, kind = err.kind(), "error creating row: {err}");
                    return Err(err.into());
                }
                self.record(id, 1).await;
                return Ok(1);
            }
            Err(err) => {
                error!(counter = %id, kind = err.kind(), "error fetching count: {err}");
                return Err(err.into());
            }
        };

        let next = current.saturating_add(1);
        if let Err(err) = self.backend.update_count(id, next).await {
            error!(counter = %id, kind = err.kind(), "error updating count: {err}");
            return Err(err.into());
        }
        self.record(id, next).await;
        Ok(next)
    }

    async fn reset(&mut self) -> Result<(), StoreError> {
        let mut first_error = None;
        for id in CounterId::ALL {
            match self.backend.update_count(id, 0).await {
                Ok(()) => self.record(id, 0).await,
                Err(err) => {
                    error!(counter = %id, kind = err.kind(), "error resetting count: {err}");
                    first_error.get_or_insert(err);
                }
            }
        }

        match first_error {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    async fn record(&mut self, id: CounterId, count: u64) {
        self.counts.set(id, count);
        self.cache.record(id, count).await;
    }
}

async fn load_remote(backend: &dyn RowStore) -> Result<Counts, BackendError> {
    let mut counts = Counts::default();
    for row in backend.select_all().await? {
        if let Ok(id) = row.id.parse::<CounterId>() {
            counts.set(id, row.count);
        }
    }
    Ok(counts)
}
