use crate::backend::RowStore;
use crate::config::Settings;
use crate::postgrest::RestBackend;
use crate::storage::LocalStore;
use crate::store::CounterStore;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<CounterStore>>,
}

impl AppState {
    pub fn new(store: CounterStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Builds the backend from `settings` and waits until the store is ready.
    pub async fn connect(settings: &Settings) -> Self {
        let cache = LocalStore::open(&settings.data_path).await;
        let store = match settings.remote.as_ref() {
            None => CounterStore::connect(None, cache).await,
            Some(remote) => {
                match RestBackend::new(&remote.url, remote.api_key.clone(), &remote.table) {
                    Ok(backend) => {
                        let backend: Arc<dyn RowStore> = Arc::new(backend);
                        CounterStore::connect(Some(backend), cache).await
                    }
                    Err(err) => CounterStore::fall_back(&err, cache),
                }
            }
        };
        Self::new(store)
    }
}
