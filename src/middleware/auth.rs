use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::error::{AppError, Result};
use crate::repositories::{SessionRepository, UserRepository};
use crate::session;

/// The authenticated principal, resolved once per request from the
/// session cookie and stashed in request extensions.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: String,
    pub username: String,
    pub is_staff: bool,
}

#[derive(Clone)]
pub struct AuthContext {
    pub session_repo: SessionRepository,
    pub user_repo: UserRepository,
}

/// Middleware: look up the session cookie and attach an [`AuthUser`]
/// extension when it maps to a live session. Requests without a valid
/// session pass through anonymously; route handlers decide whether
/// that is acceptable via the extractors below.
pub async fn resolve_session(
    State(ctx): State<AuthContext>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    if let Some(token) = session::get_session_token(&jar) {
        if let Some(user_id) = ctx.session_repo.find_valid(&token).await? {
            if let Some(user) = ctx.user_repo.find_by_id(&user_id).await? {
                request.extensions_mut().insert(AuthUser {
                    id: user.id,
                    username: user.username,
                    is_staff: user.is_staff,
                });
            }
        }
    }

    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(AppError::AuthenticationRequired)
    }
}

// Optional auth: never rejects, routes that serve anonymous callers
// (the workout listing, the exercise catalog reads) use this.
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        Ok(OptionalAuthUser(parts.extensions.get::<AuthUser>().cloned()))
    }
}
