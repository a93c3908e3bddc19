pub mod app;
pub mod backend;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod postgrest;
pub mod state;
pub mod storage;
pub mod store;

pub use app::router;
pub use config::Settings;
pub use state::AppState;
pub use store::CounterStore;
