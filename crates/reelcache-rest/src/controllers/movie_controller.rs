//! Movie lookup controller.

use crate::{
    responses::{ok, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use reelcache_core::{MovieRecord, MovieSummary, ReelError};
use serde_json::json;
use tracing::debug;

/// Creates the versioned movie router, nested under `/api/v1/movies`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/popular", get(popular_movies))
        .route("/:id", get(get_movie))
}

/// Creates the bare `/movie/:id` route kept for existing clients.
pub fn legacy_router() -> Router<AppState> {
    Router::new().route("/movie/:id", get(get_movie_legacy))
}

/// Get movie details inside the API envelope.
async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<MovieRecord> {
    debug!("Get movie request: {}", id);

    match state.details_service.get_details(&id).await? {
        Some(record) => ok(record),
        None => Err(AppError(ReelError::not_found("Movie", id))),
    }
}

/// List popular movies.
async fn popular_movies(State(state): State<AppState>) -> ApiResult<Vec<MovieSummary>> {
    debug!("Popular movies request");

    let movies = state.details_service.popular_movies().await?;
    ok(movies)
}

/// Get movie details as the provider's raw document.
///
/// Not-found is answered with `{"error": "Movie not found"}`.
async fn get_movie_legacy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    debug!("Legacy movie request: {}", id);

    let response = match state.details_service.get_details(&id).await? {
        Some(record) => Json(record).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Movie not found"})),
        )
            .into_response(),
    };

    Ok(response)
}
