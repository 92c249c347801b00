use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{UserProfile, WorkoutDetail};
use crate::policy;
use crate::repositories::{UserRepository, WorkoutRepository};

#[derive(Clone)]
pub struct UsersState {
    pub user_repo: UserRepository,
    pub workout_repo: WorkoutRepository,
}

/// `GET /me/` - the authenticated principal's own profile.
pub async fn me(State(state): State<UsersState>, auth_user: AuthUser) -> Result<Json<UserProfile>> {
    let user = state
        .user_repo
        .find_by_id(&auth_user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(UserProfile::from(user)))
}

/// `GET /users/{user_id}/workouts/` - another user's workouts, staff or
/// the user themselves only. A missing target user is a 404; a live
/// target behind insufficient rights is a 403.
pub async fn user_workouts(
    State(state): State<UsersState>,
    auth_user: AuthUser,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<WorkoutDetail>>> {
    let target = state
        .user_repo
        .find_by_id(&user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    policy::authorize_user_listing(&auth_user, &target.id)?;

    let workouts = state.workout_repo.find_by_user_detail(&target.id).await?;
    Ok(Json(workouts))
}
