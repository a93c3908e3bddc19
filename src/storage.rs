use crate::models::{CounterId, Counts};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info};

/// Counts persisted as a single JSON object on disk.
///
/// Persistence failures never fail an operation: they are logged and the in-memory
/// value is still returned.
#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    counts: Counts,
}

impl LocalStore {
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(err) = fs::create_dir_all(parent).await {
                error!("failed to create data directory {}: {err}", parent.display());
            }
        }

        let counts = load_counts(&path).await;
        info!(square = counts.square, circle = counts.circle, "local store opened");
        Self { path, counts }
    }

    pub fn counts(&self) -> Counts {
        self.counts
    }

    pub fn get(&self, id: CounterId) -> u64 {
        self.counts.get(id)
    }

    pub async fn increment(&mut self, id: CounterId) -> u64 {
        let next = self.counts.get(id).saturating_add(1);
        self.counts.set(id, next);
        self.persist().await;
        next
    }

    pub async fn reset(&mut self) {
        self.counts = Counts::default();
        self.persist().await;
    }

    pub async fn record(&mut self, id: CounterId, count: u64) {
        self.counts.set(id, count);
        self.persist().await;
    }

    pub async fn replace(&mut self, counts: Counts) {
        self.counts = counts;
        self.persist().await;
    }

    async fn persist(&self) {
        if let Err(err) = persist_counts(&self.path, &self.counts).await {
            error!("failed to write {}: {err}", self.path.display());
        }
    }
}

async fn load_counts(path: &Path) -> Counts {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(counts) => counts,
            Err(err) => {
                error!("failed to parse data file: {err}");
                Counts::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Counts::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            Counts::default()
        }
    }
}

async fn persist_counts(path: &Path, counts: &Counts) -> std::io::Result<()> {
    let payload = serde_json::to_vec_pretty(counts)?;
    fs::write(path, payload).await
}
