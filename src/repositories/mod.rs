pub mod exercise_repo;
pub mod session_repo;
pub mod user_repo;
pub mod workout_repo;

pub use exercise_repo::ExerciseRepository;
pub use session_repo::SessionRepository;
pub use user_repo::{NewUser, UserRepository};
pub use workout_repo::WorkoutRepository;
