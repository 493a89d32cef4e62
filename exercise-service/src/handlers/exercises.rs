use crate::dtos::{CreateExerciseRequest, ExerciseEnvelope, UpdateExerciseRequest};
use crate::middleware::{AppJson, AuthUser, NonBlankJson};
use crate::models::{Exercise, ExercisePatch};
use crate::services::{metrics, require_ownership};
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;
use validator::Validate;

async fn find_exercise(state: &AppState, id: &str) -> Result<Exercise, AppError> {
    state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Exercise not found")))
}

/// POST /exercises
#[tracing::instrument(skip(state, user, request), fields(user_id = %user.user_id))]
pub async fn create_exercise(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(request): AppJson<CreateExerciseRequest>,
) -> Result<(StatusCode, Json<ExerciseEnvelope>), AppError> {
    request.validate()?;

    let fields = request.exercise.into_new_exercise().ok_or_else(|| {
        AppError::InternalError(anyhow::anyhow!("validated exercise is missing a field"))
    })?;

    let exercise = state.store.insert(fields, &user.user_id).await?;

    metrics::record_exercise_created();
    tracing::info!(exercise_id = %exercise.id, owner = %exercise.owner, "Exercise created");

    Ok((
        StatusCode::CREATED,
        Json(ExerciseEnvelope {
            exercise: exercise.into(),
        }),
    ))
}

/// PATCH /exercises/:id
#[tracing::instrument(skip(state, user, request), fields(user_id = %user.user_id))]
pub async fn update_exercise(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    NonBlankJson(request): NonBlankJson<UpdateExerciseRequest>,
) -> Result<StatusCode, AppError> {
    let exercise = find_exercise(&state, &id).await?;
    require_ownership(&exercise, &user.user_id)?;

    let patch = ExercisePatch::from_fields(request.exercise)?;

    state.store.update(&exercise.id, &patch).await?;

    metrics::record_exercise_updated();
    tracing::info!(exercise_id = %exercise.id, empty_patch = patch.is_empty(), "Exercise updated");

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /exercises/:id
#[tracing::instrument(skip(state, user), fields(user_id = %user.user_id))]
pub async fn delete_exercise(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let exercise = find_exercise(&state, &id).await?;
    require_ownership(&exercise, &user.user_id)?;

    state.store.delete(&exercise.id).await?;

    metrics::record_exercise_deleted();
    tracing::info!(exercise_id = %exercise.id, "Exercise deleted");

    Ok(StatusCode::NO_CONTENT)
}
