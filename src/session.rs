//! Session cookie helpers.
//!
//! The cookie only carries the opaque token; the sessions table is the
//! source of truth. [`SESSION_TTL_DAYS`] is shared with
//! `SessionRepository` so the cookie and the stored expiry cannot
//! drift apart.

use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;

pub const SESSION_COOKIE_NAME: &str = "setrep_session";

/// Lifetime of a session, cookie side and database side.
pub const SESSION_TTL_DAYS: i64 = 7;

pub fn create_session_cookie(token: &str) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, token.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::days(SESSION_TTL_DAYS))
        .build()
}

pub fn get_session_token(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
}

/// An expired, empty cookie that tells the browser to drop the session.
pub fn remove_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .max_age(time::Duration::ZERO)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_uses_project_name_and_ttl() {
        let cookie = create_session_cookie("tok-123");
        assert_eq!(cookie.name(), SESSION_COOKIE_NAME);
        assert_eq!(cookie.value(), "tok-123");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(
            cookie.max_age(),
            Some(time::Duration::days(SESSION_TTL_DAYS))
        );
    }

    #[test]
    fn test_get_session_token_reads_the_jar() {
        let jar = CookieJar::new().add(create_session_cookie("tok-123"));
        assert_eq!(get_session_token(&jar), Some("tok-123".to_string()));

        let empty = CookieJar::new();
        assert_eq!(get_session_token(&empty), None);
    }

    #[test]
    fn test_remove_session_cookie_expires_immediately() {
        let cookie = remove_session_cookie();
        assert_eq!(cookie.name(), SESSION_COOKIE_NAME);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
    }
}
