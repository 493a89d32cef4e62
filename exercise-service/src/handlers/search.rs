use crate::dtos::SearchParams;
use crate::services::metrics;
use crate::startup::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;
use service_core::error::AppError;

/// POST /exercises/search?search=<muscle>
#[tracing::instrument(skip(state))]
pub async fn search_exercises(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>, AppError> {
    match state.exercise_api.search_by_muscle(params.search.as_deref()).await {
        Ok(body) => {
            metrics::record_lookup("muscle", "ok");
            Ok(Json(body))
        }
        Err(e) => {
            metrics::record_lookup("muscle", "error");
            Err(AppError::Upstream(e))
        }
    }
}

/// GET /exercises/:name
#[tracing::instrument(skip(state))]
pub async fn lookup_exercise(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Value>, AppError> {
    match state.exercise_api.search_by_name(&name).await {
        Ok(body) => {
            metrics::record_lookup("name", "ok");
            Ok(Json(body))
        }
        Err(e) => {
            metrics::record_lookup("name", "error");
            Err(AppError::Upstream(e))
        }
    }
}
