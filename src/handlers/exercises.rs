use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{CreateExercise, Exercise, UpdateExercise};
use crate::repositories::ExerciseRepository;

#[derive(Clone)]
pub struct ExercisesState {
    pub exercise_repo: ExerciseRepository,
}

// Catalog reads are open; writes require an authenticated principal,
// expressed by taking the AuthUser extractor on the write handlers.

pub async fn list(State(state): State<ExercisesState>) -> Result<Json<Vec<Exercise>>> {
    let exercises = state.exercise_repo.find_all().await?;
    Ok(Json(exercises))
}

pub async fn show(
    State(state): State<ExercisesState>,
    Path(id): Path<String>,
) -> Result<Json<Exercise>> {
    let exercise = state
        .exercise_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Exercise not found".to_string()))?;
    Ok(Json(exercise))
}

pub async fn create(
    State(state): State<ExercisesState>,
    _auth_user: AuthUser,
    Json(payload): Json<CreateExercise>,
) -> Result<Response> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation(
            "Exercise name is required".to_string(),
        ));
    }

    let exercise = state
        .exercise_repo
        .create(
            &payload.name,
            payload.description.as_deref().unwrap_or(""),
            payload.category.as_deref().unwrap_or(""),
            payload.default_unit.as_deref().unwrap_or("reps"),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(exercise)).into_response())
}

pub async fn update(
    State(state): State<ExercisesState>,
    _auth_user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateExercise>,
) -> Result<Json<Exercise>> {
    let existing = state
        .exercise_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Exercise not found".to_string()))?;

    let name = payload.name.unwrap_or(existing.name);
    if name.trim().is_empty() {
        return Err(AppError::Validation(
            "Exercise name is required".to_string(),
        ));
    }

    state
        .exercise_repo
        .update(
            &id,
            &name,
            payload.description.as_deref().unwrap_or(&existing.description),
            payload.category.as_deref().unwrap_or(&existing.category),
            payload
                .default_unit
                .as_deref()
                .unwrap_or(&existing.default_unit),
        )
        .await?;

    let updated = state
        .exercise_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Exercise not found".to_string()))?;
    Ok(Json(updated))
}

pub async fn delete(
    State(state): State<ExercisesState>,
    _auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Response> {
    let deleted = state.exercise_repo.delete(&id).await?;
    if !deleted {
        return Err(AppError::NotFound("Exercise not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT.into_response())
}
