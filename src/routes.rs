use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::handlers::{auth, exercises, health, users, workouts};
use crate::middleware::{auth::resolve_session, AuthContext};

pub fn create_router(
    auth_state: auth::AuthState,
    users_state: users::UsersState,
    exercises_state: exercises::ExercisesState,
    workouts_state: workouts::WorkoutsState,
    auth_ctx: AuthContext,
) -> Router {
    Router::new()
        // Auth routes
        .route("/register/", post(auth::register))
        .route("/login/", post(auth::login))
        .route("/logout/", post(auth::logout))
        .with_state(auth_state)
        // User routes
        .route("/me/", get(users::me))
        .route("/users/{user_id}/workouts/", get(users::user_workouts))
        .with_state(users_state)
        // Exercise catalog
        .route(
            "/exercises/",
            get(exercises::list).post(exercises::create),
        )
        .route(
            "/exercises/{id}/",
            get(exercises::show)
                .put(exercises::update)
                .patch(exercises::update)
                .delete(exercises::delete),
        )
        .with_state(exercises_state)
        // Workout aggregate
        .route("/workouts/", get(workouts::list).post(workouts::create))
        .route(
            "/workouts/{id}/",
            get(workouts::show)
                .put(workouts::update)
                .patch(workouts::update)
                .delete(workouts::delete),
        )
        .with_state(workouts_state)
        // Health
        .route("/health", get(health::health_check))
        // Session resolution runs before every route
        .layer(from_fn_with_state(auth_ctx, resolve_session))
}
