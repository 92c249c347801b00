use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::{AppError, Result};
use crate::middleware::{AuthUser, OptionalAuthUser};
use crate::models::{CreateWorkout, UpdateWorkout, Workout, WorkoutDetail};
use crate::policy::{self, WorkoutScope};
use crate::repositories::WorkoutRepository;

#[derive(Clone)]
pub struct WorkoutsState {
    pub workout_repo: WorkoutRepository,
}

/// `GET /workouts/` - everything visible to the principal. Anonymous
/// callers get an empty list, not an error.
pub async fn list(
    State(state): State<WorkoutsState>,
    OptionalAuthUser(auth_user): OptionalAuthUser,
) -> Result<Json<Vec<WorkoutDetail>>> {
    let workouts = match policy::workout_scope(auth_user.as_ref()) {
        WorkoutScope::Nothing => Vec::new(),
        WorkoutScope::All => state.workout_repo.find_all_detail().await?,
        WorkoutScope::OwnedBy(user_id) => {
            state.workout_repo.find_by_user_detail(&user_id).await?
        }
    };
    Ok(Json(workouts))
}

/// `POST /workouts/` - create the aggregate. Ownership is taken from
/// the session, never from the payload.
pub async fn create(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Json(payload): Json<CreateWorkout>,
) -> Result<Response> {
    let detail = state.workout_repo.create(&auth_user.id, payload).await?;
    Ok((StatusCode::CREATED, Json(detail)).into_response())
}

pub async fn show(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<WorkoutDetail>> {
    load_authorized(&state, &auth_user, &id).await?;

    let detail = state
        .workout_repo
        .find_detail_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Workout not found".to_string()))?;
    Ok(Json(detail))
}

pub async fn update(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateWorkout>,
) -> Result<Json<WorkoutDetail>> {
    load_authorized(&state, &auth_user, &id).await?;

    let detail = state.workout_repo.update(&id, payload).await?;
    Ok(Json(detail))
}

pub async fn delete(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Response> {
    load_authorized(&state, &auth_user, &id).await?;

    state.workout_repo.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Fetch the workout and apply the access policy. A workout outside
/// the principal's scope reads as missing, the same as the filtered
/// listing would show.
async fn load_authorized(
    state: &WorkoutsState,
    auth_user: &AuthUser,
    id: &str,
) -> Result<Workout> {
    let workout = state
        .workout_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Workout not found".to_string()))?;

    if !policy::can_touch_workout(auth_user, &workout) {
        return Err(AppError::NotFound("Workout not found".to_string()));
    }

    Ok(workout)
}
