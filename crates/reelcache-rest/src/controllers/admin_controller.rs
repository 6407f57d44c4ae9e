//! Cache administration controller.

use crate::{
    responses::{no_content, ok, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::delete,
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Result of evicting a single cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvictResponse {
    pub deleted: bool,
}

/// Creates the admin router, nested under `/api/v1/admin`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cache", delete(clear_cache))
        .route("/cache/:key", delete(evict))
}

async fn evict(State(state): State<AppState>, Path(key): Path<String>) -> ApiResult<EvictResponse> {
    info!("Evict cache entry request: {}", key);

    let deleted = state.details_service.evict(&key).await?;
    ok(EvictResponse { deleted })
}

async fn clear_cache(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    info!("Clear cache request");

    state.details_service.clear_cache().await?;
    Ok(no_content())
}
