use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::{Exercise, FromSqliteRow};
use crate::error::{AppError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    pub id: String,
    pub user_id: String,
    pub date: DateTime<Utc>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

impl FromSqliteRow for Workout {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            date: row.get("date")?,
            notes: row.get("notes")?,
            created_at: row.get("created_at")?,
        })
    }
}

/// One exercise performed within a workout. The `order` field is the
/// display position; duplicates are allowed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutExercise {
    pub id: String,
    pub workout_id: String,
    pub exercise_id: String,
    pub order: i64,
    pub notes: String,
}

impl FromSqliteRow for WorkoutExercise {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            workout_id: row.get("workout_id")?,
            exercise_id: row.get("exercise_id")?,
            order: row.get("sort_order")?,
            notes: row.get("notes")?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseSet {
    pub id: String,
    pub workout_exercise_id: String,
    pub set_number: i64,
    pub reps: Option<i64>,
    pub weight: Option<f64>,
    pub duration_seconds: Option<i64>,
    pub rest_seconds: Option<i64>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl FromSqliteRow for ExerciseSet {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            workout_exercise_id: row.get("workout_exercise_id")?,
            set_number: row.get("set_number")?,
            reps: row.get("reps")?,
            weight: row.get("weight")?,
            duration_seconds: row.get("duration_seconds")?,
            rest_seconds: row.get("rest_seconds")?,
            completed: row.get("completed")?,
            created_at: row.get("created_at")?,
        })
    }
}

// Write payloads. Nested `id` fields are accepted in the shape because
// clients echo back what they read, but the replace strategy always
// assigns fresh ids.

#[derive(Debug, Clone, Deserialize)]
pub struct SetPayload {
    #[serde(default)]
    pub id: Option<String>,
    pub set_number: i64,
    #[serde(default)]
    pub reps: Option<i64>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub duration_seconds: Option<i64>,
    #[serde(default)]
    pub rest_seconds: Option<i64>,
    #[serde(default)]
    pub completed: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkoutExercisePayload {
    #[serde(default)]
    pub id: Option<String>,
    pub exercise_id: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub sets: Vec<SetPayload>,
}

#[derive(Debug, Deserialize)]
pub struct CreateWorkout {
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub exercises: Vec<WorkoutExercisePayload>,
}

/// Shared by PUT and PATCH. The nested rows are replaced only when the
/// `exercises` key is present; when it is absent they are left alone.
#[derive(Debug, Deserialize)]
pub struct UpdateWorkout {
    pub date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub exercises: Option<Vec<WorkoutExercisePayload>>,
}

/// Validate nested entries before anything touches the database.
pub fn validate_exercises(entries: &[WorkoutExercisePayload]) -> Result<()> {
    for entry in entries {
        if entry.order < 0 {
            return Err(AppError::Validation("order must be >= 0".to_string()));
        }
        let mut seen = std::collections::HashSet::new();
        for set in &entry.sets {
            if set.set_number < 1 {
                return Err(AppError::Validation(
                    "set_number must be >= 1".to_string(),
                ));
            }
            if set.reps.is_some_and(|r| r < 0) {
                return Err(AppError::Validation("reps must be >= 0".to_string()));
            }
            if set.weight.is_some_and(|w| w < 0.0) {
                return Err(AppError::Validation("weight must be >= 0".to_string()));
            }
            if set.duration_seconds.is_some_and(|d| d < 0) {
                return Err(AppError::Validation(
                    "duration_seconds must be >= 0".to_string(),
                ));
            }
            if !seen.insert(set.set_number) {
                return Err(AppError::Conflict(format!(
                    "duplicate set_number {}",
                    set.set_number
                )));
            }
        }
    }
    Ok(())
}

// Read shapes: a workout with its exercises and sets fully expanded,
// sorted by `order` and `set_number` respectively.

#[derive(Debug, Clone, Serialize)]
pub struct WorkoutExerciseDetail {
    pub id: String,
    pub exercise_id: String,
    pub exercise_detail: Exercise,
    pub order: i64,
    pub notes: String,
    pub sets: Vec<ExerciseSet>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkoutDetail {
    pub id: String,
    pub user_id: String,
    pub date: DateTime<Utc>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub exercises: Vec<WorkoutExerciseDetail>,
}
