pub mod auth;

pub use auth::{AuthContext, AuthUser, OptionalAuthUser};
