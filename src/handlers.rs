use crate::errors::AppError;
use crate::models::{ClickRequest, CounterId, CounterResponse, CountsResponse};
use crate::state::AppState;
use crate::store::CounterStore;
use axum::{
    extract::{Path, State},
    Json,
};

pub async fn get_counts(State(state): State<AppState>) -> Json<CountsResponse> {
    let store = state.store.lock().await;
    Json(to_counts_response(&store))
}

pub async fn get_counter(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CounterResponse>, AppError> {
    let id: CounterId = id.parse()?;
    let store = state.store.lock().await;
    Ok(Json(CounterResponse {
        id,
        count: store.get(id),
    }))
}

pub async fn click(
    State(state): State<AppState>,
    Json(payload): Json<ClickRequest>,
) -> Result<Json<CounterResponse>, AppError> {
    apply_click(&state, &payload.id).await.map(Json)
}

pub async fn click_path(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CounterResponse>, AppError> {
    apply_click(&state, &id).await.map(Json)
}

pub async fn reset(State(state): State<AppState>) -> Result<Json<CountsResponse>, AppError> {
    let mut store = state.store.lock().await;
    store.reset().await?;
    Ok(Json(to_counts_response(&store)))
}

async fn apply_click(state: &AppState, name: &str) -> Result<CounterResponse, AppError> {
    let id: CounterId = name.parse()?;
    let mut store = state.store.lock().await;
    let count = store.increment(id).await?;
    Ok(CounterResponse { id, count })
}

fn to_counts_response(store: &CounterStore) -> CountsResponse {
    let counts = store.counts();
    CountsResponse {
        square: counts.square,
        circle: counts.circle,
        mode: store.mode(),
    }
}
