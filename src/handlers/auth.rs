use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::CookieJar;
use serde_json::json;

use crate::error::{AppError, Result};
use crate::models::{LoginCredentials, RegisterUser, UserProfile};
use crate::repositories::{NewUser, SessionRepository, UserRepository};
use crate::session;

#[derive(Clone)]
pub struct AuthState {
    pub user_repo: UserRepository,
    pub session_repo: SessionRepository,
}

pub async fn register(
    State(state): State<AuthState>,
    Json(payload): Json<RegisterUser>,
) -> Result<Response> {
    let (username, password) = payload.validate()?;

    state
        .user_repo
        .create(NewUser {
            username: username.to_string(),
            email: payload.email.clone().unwrap_or_default(),
            password: password.to_string(),
            is_staff: false,
            age: payload.age,
            weight: payload.weight,
            height: payload.height,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({"message": "User created successfully"})),
    )
        .into_response())
}

pub async fn login(
    State(state): State<AuthState>,
    jar: CookieJar,
    Json(credentials): Json<LoginCredentials>,
) -> Result<Response> {
    let user = state
        .user_repo
        .verify_password(&credentials.username, &credentials.password)
        .await?
        .ok_or_else(|| AppError::Validation("Invalid username or password".to_string()))?;

    let token = state.session_repo.create(&user.id).await?;
    let jar = jar.add(session::create_session_cookie(&token));

    Ok((jar, Json(UserProfile::from(user))).into_response())
}

pub async fn logout(State(state): State<AuthState>, jar: CookieJar) -> Result<Response> {
    if let Some(token) = session::get_session_token(&jar) {
        state.session_repo.delete(&token).await?;
    }
    let jar = jar.add(session::remove_session_cookie());

    Ok((jar, Json(json!({"message": "Logged out"}))).into_response())
}
