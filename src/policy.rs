//! Access policy for workout rows.
//!
//! Every read or write path asks these functions first, instead of
//! burying the rules in individual handlers: staff see and touch
//! everything, regular users only their own workouts, anonymous
//! callers see nothing.

use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::Workout;

/// Which workout rows a principal may see when listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkoutScope {
    /// Anonymous: an empty result set, not an error.
    Nothing,
    /// Staff: every row.
    All,
    /// Regular user: rows owned by this user id.
    OwnedBy(String),
}

pub fn workout_scope(principal: Option<&AuthUser>) -> WorkoutScope {
    match principal {
        None => WorkoutScope::Nothing,
        Some(user) if user.is_staff => WorkoutScope::All,
        Some(user) => WorkoutScope::OwnedBy(user.id.clone()),
    }
}

/// May the principal read or mutate this specific workout?
pub fn can_touch_workout(principal: &AuthUser, workout: &Workout) -> bool {
    principal.is_staff || workout.user_id == principal.id
}

/// Listing another user's workouts is limited to staff and the user
/// themselves. Denial is explicit (403), not hidden behind a 404.
pub fn authorize_user_listing(principal: &AuthUser, target_user_id: &str) -> Result<()> {
    if principal.is_staff || principal.id == target_user_id {
        Ok(())
    } else {
        Err(AppError::PermissionDenied(
            "Permission denied".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(id: &str, is_staff: bool) -> AuthUser {
        AuthUser {
            id: id.to_string(),
            username: format!("user_{}", id),
            is_staff,
        }
    }

    fn workout(owner: &str) -> Workout {
        Workout {
            id: "w1".to_string(),
            user_id: owner.to_string(),
            date: Utc::now(),
            notes: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_anonymous_scope_is_empty() {
        assert_eq!(workout_scope(None), WorkoutScope::Nothing);
    }

    #[test]
    fn test_staff_scope_is_all() {
        assert_eq!(workout_scope(Some(&user("a", true))), WorkoutScope::All);
    }

    #[test]
    fn test_regular_scope_is_own_rows() {
        assert_eq!(
            workout_scope(Some(&user("a", false))),
            WorkoutScope::OwnedBy("a".to_string())
        );
    }

    #[test]
    fn test_owner_can_touch_own_workout() {
        assert!(can_touch_workout(&user("a", false), &workout("a")));
    }

    #[test]
    fn test_non_owner_cannot_touch() {
        assert!(!can_touch_workout(&user("b", false), &workout("a")));
    }

    #[test]
    fn test_staff_can_touch_any_workout() {
        assert!(can_touch_workout(&user("b", true), &workout("a")));
    }

    #[test]
    fn test_user_listing_self_and_staff_allowed() {
        assert!(authorize_user_listing(&user("a", false), "a").is_ok());
        assert!(authorize_user_listing(&user("b", true), "a").is_ok());
    }

    #[test]
    fn test_user_listing_other_denied() {
        let err = authorize_user_listing(&user("b", false), "a").unwrap_err();
        assert!(matches!(err, AppError::PermissionDenied(_)));
    }
}
