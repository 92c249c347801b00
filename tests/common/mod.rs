#![allow(dead_code)]

use axum::{body::Body, http::Request, response::Response, Router};
use http_body_util::BodyExt;
use serde_json::Value;

use setrep::db::{create_memory_pool, DbPool};
use setrep::handlers::{auth, exercises, users, workouts};
use setrep::middleware::AuthContext;
use setrep::migrations::run_migrations_for_tests;
use setrep::models::{Exercise, User};
use setrep::repositories::{
    ExerciseRepository, NewUser, SessionRepository, UserRepository, WorkoutRepository,
};

pub fn setup_test_db() -> DbPool {
    let pool = create_memory_pool().expect("Failed to create test database");
    run_migrations_for_tests(&pool).expect("Failed to run migrations");
    pool
}

pub fn create_test_app(pool: DbPool) -> Router {
    let user_repo = UserRepository::new(pool.clone());
    let session_repo = SessionRepository::new(pool.clone());
    let exercise_repo = ExerciseRepository::new(pool.clone());
    let workout_repo = WorkoutRepository::new(pool.clone());

    let auth_state = auth::AuthState {
        user_repo: user_repo.clone(),
        session_repo: session_repo.clone(),
    };
    let users_state = users::UsersState {
        user_repo: user_repo.clone(),
        workout_repo: workout_repo.clone(),
    };
    let exercises_state = exercises::ExercisesState {
        exercise_repo: exercise_repo.clone(),
    };
    let workouts_state = workouts::WorkoutsState {
        workout_repo: workout_repo.clone(),
    };
    let auth_ctx = AuthContext {
        session_repo,
        user_repo,
    };

    setrep::routes::create_router(
        auth_state,
        users_state,
        exercises_state,
        workouts_state,
        auth_ctx,
    )
}

pub async fn create_test_user(
    pool: &DbPool,
    username: &str,
    password: &str,
    is_staff: bool,
) -> User {
    let user_repo = UserRepository::new(pool.clone());
    user_repo
        .create(NewUser {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password: password.to_string(),
            is_staff,
            age: None,
            weight: None,
            height: None,
        })
        .await
        .unwrap()
}

/// Log the user in at the repository level and return a `Cookie` header
/// value carrying the session token.
pub async fn create_session_cookie(pool: &DbPool, user: &User) -> String {
    let session_repo = SessionRepository::new(pool.clone());
    let token = session_repo.create(&user.id).await.unwrap();
    format!("{}={}", setrep::session::SESSION_COOKIE_NAME, token)
}

pub async fn create_test_exercise(pool: &DbPool, name: &str) -> Exercise {
    let exercise_repo = ExerciseRepository::new(pool.clone());
    exercise_repo
        .create(name, "", "strength", "reps")
        .await
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("cookie", cookie)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header("cookie", cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn delete_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .header("cookie", cookie)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
