pub mod exercise;
pub mod from_row;
pub mod user;
pub mod workout;

pub use exercise::{CreateExercise, Exercise, UpdateExercise};
pub use from_row::FromSqliteRow;
pub use user::{LoginCredentials, RegisterUser, User, UserProfile};
pub use workout::{
    validate_exercises, CreateWorkout, ExerciseSet, SetPayload, UpdateWorkout, Workout,
    WorkoutDetail, WorkoutExercise, WorkoutExerciseDetail, WorkoutExercisePayload,
};
