pub mod auth;
pub mod exercises;
pub mod health;
pub mod users;
pub mod workouts;
