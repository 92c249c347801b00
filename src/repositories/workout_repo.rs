use chrono::Utc;
use rusqlite::OptionalExtension;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{constraint_error, AppError, Result};
use crate::models::{
    validate_exercises, CreateWorkout, Exercise, ExerciseSet, FromSqliteRow, UpdateWorkout,
    Workout, WorkoutDetail, WorkoutExercise, WorkoutExerciseDetail, WorkoutExercisePayload,
};

/// Persistence for the Workout aggregate: a workout with its ordered
/// exercise entries and their ordered sets, written as one unit.
#[derive(Clone)]
pub struct WorkoutRepository {
    pool: DbPool,
}

impl WorkoutRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create the whole aggregate in one transaction. The owner is always
    /// the given user; nothing client-supplied can change that. Any
    /// failure rolls back every row.
    pub async fn create(&self, user_id: &str, payload: CreateWorkout) -> Result<WorkoutDetail> {
        validate_exercises(&payload.exercises)?;

        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            let tx = conn.transaction()?;

            let workout_id = Uuid::new_v4().to_string();
            let now = Utc::now();
            tx.execute(
                "INSERT INTO workouts (id, user_id, date, notes, created_at) VALUES (?, ?, ?, ?, ?)",
                rusqlite::params![
                    workout_id,
                    user_id,
                    payload.date,
                    payload.notes.as_deref().unwrap_or(""),
                    now
                ],
            )?;

            insert_entries(&tx, &workout_id, &payload.exercises)?;

            tx.commit()?;

            load_detail(&conn, &workout_id)?
                .ok_or_else(|| AppError::Internal("workout vanished after commit".to_string()))
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Update the aggregate in one transaction using the replace strategy:
    /// scalar fields are patched, and when the payload carries an
    /// `exercises` key (even an empty one) every existing nested row is
    /// deleted and re-created from the payload. Without the key the
    /// nested rows are left untouched.
    pub async fn update(&self, id: &str, payload: UpdateWorkout) -> Result<WorkoutDetail> {
        if let Some(entries) = &payload.exercises {
            validate_exercises(entries)?;
        }

        let pool = self.pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            let tx = conn.transaction()?;

            let exists: bool = tx.query_row(
                "SELECT COUNT(*) > 0 FROM workouts WHERE id = ?",
                [&id],
                |row| row.get(0),
            )?;
            if !exists {
                return Err(AppError::NotFound("Workout not found".to_string()));
            }

            if let Some(date) = payload.date {
                tx.execute(
                    "UPDATE workouts SET date = ? WHERE id = ?",
                    rusqlite::params![date, id],
                )?;
            }
            if let Some(notes) = &payload.notes {
                tx.execute(
                    "UPDATE workouts SET notes = ? WHERE id = ?",
                    rusqlite::params![notes, id],
                )?;
            }

            if let Some(entries) = &payload.exercises {
                // Replace strategy: drop all nested rows (sets cascade)
                // and rebuild from the payload with fresh ids.
                tx.execute("DELETE FROM workout_exercises WHERE workout_id = ?", [&id])?;
                insert_entries(&tx, &id, entries)?;
            }

            tx.commit()?;

            load_detail(&conn, &id)?
                .ok_or_else(|| AppError::Internal("workout vanished after commit".to_string()))
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Workout>> {
        let pool = self.pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM workouts WHERE id = ?")?;
            let result = stmt.query_row([&id], Workout::from_row).optional()?;
            Ok(result)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_detail_by_id(&self, id: &str) -> Result<Option<WorkoutDetail>> {
        let pool = self.pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            load_detail(&conn, &id)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// All workouts, newest first. Staff-only callers.
    pub async fn find_all_detail(&self) -> Result<Vec<WorkoutDetail>> {
        self.list_detail("SELECT id FROM workouts ORDER BY date DESC", None)
            .await
    }

    /// One user's workouts, newest first.
    pub async fn find_by_user_detail(&self, user_id: &str) -> Result<Vec<WorkoutDetail>> {
        self.list_detail(
            "SELECT id FROM workouts WHERE user_id = ? ORDER BY date DESC",
            Some(user_id.to_string()),
        )
        .await
    }

    async fn list_detail(
        &self,
        sql: &'static str,
        param: Option<String>,
    ) -> Result<Vec<WorkoutDetail>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare(sql)?;
            let ids: Vec<String> = match &param {
                Some(p) => stmt
                    .query_map([p], |row| row.get(0))?
                    .collect::<rusqlite::Result<Vec<_>>>()?,
                None => stmt
                    .query_map([], |row| row.get(0))?
                    .collect::<rusqlite::Result<Vec<_>>>()?,
            };

            let mut details = Vec::with_capacity(ids.len());
            for id in ids {
                if let Some(detail) = load_detail(&conn, &id)? {
                    details.push(detail);
                }
            }
            Ok(details)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let pool = self.pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute("DELETE FROM workouts WHERE id = ?", [&id])?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}

/// Insert the nested entries under a workout. Runs inside the caller's
/// transaction so a failed lookup or constraint aborts the whole write.
fn insert_entries(
    conn: &rusqlite::Connection,
    workout_id: &str,
    entries: &[WorkoutExercisePayload],
) -> Result<()> {
    for entry in entries {
        let exercise_exists: bool = conn.query_row(
            "SELECT COUNT(*) > 0 FROM exercises WHERE id = ?",
            [&entry.exercise_id],
            |row| row.get(0),
        )?;
        if !exercise_exists {
            return Err(AppError::NotFound(format!(
                "Exercise {} not found",
                entry.exercise_id
            )));
        }

        let we_id = Uuid::new_v4().to_string();
        conn.execute(
            "INSERT INTO workout_exercises (id, workout_id, exercise_id, sort_order, notes)
             VALUES (?, ?, ?, ?, ?)",
            rusqlite::params![
                we_id,
                workout_id,
                entry.exercise_id,
                entry.order,
                entry.notes.as_deref().unwrap_or("")
            ],
        )?;

        let now = Utc::now();
        for set in &entry.sets {
            conn.execute(
                "INSERT INTO exercise_sets
                 (id, workout_exercise_id, set_number, reps, weight, duration_seconds, rest_seconds, completed, created_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
                rusqlite::params![
                    Uuid::new_v4().to_string(),
                    we_id,
                    set.set_number,
                    set.reps,
                    set.weight,
                    set.duration_seconds,
                    set.rest_seconds,
                    set.completed.unwrap_or(true),
                    now
                ],
            )
            .map_err(|e| constraint_error(e, "duplicate set_number"))?;
        }
    }
    Ok(())
}

/// Assemble the full aggregate: exercises sorted by `order`, sets by
/// `set_number`, with the catalog row embedded per entry.
fn load_detail(conn: &rusqlite::Connection, id: &str) -> Result<Option<WorkoutDetail>> {
    let mut stmt = conn.prepare("SELECT * FROM workouts WHERE id = ?")?;
    let workout = match stmt.query_row([&id], Workout::from_row).optional()? {
        Some(w) => w,
        None => return Ok(None),
    };

    let mut stmt = conn.prepare(
        "SELECT * FROM workout_exercises WHERE workout_id = ? ORDER BY sort_order",
    )?;
    let entries = stmt
        .query_map([&id], WorkoutExercise::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut exercise_stmt = conn.prepare("SELECT * FROM exercises WHERE id = ?")?;
    let mut set_stmt = conn.prepare(
        "SELECT * FROM exercise_sets WHERE workout_exercise_id = ? ORDER BY set_number",
    )?;
    let mut exercises = Vec::with_capacity(entries.len());
    for entry in entries {
        let exercise_detail =
            exercise_stmt.query_row([&entry.exercise_id], Exercise::from_row)?;
        let sets = set_stmt
            .query_map([&entry.id], ExerciseSet::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        exercises.push(WorkoutExerciseDetail {
            id: entry.id,
            exercise_id: entry.exercise_id,
            exercise_detail,
            order: entry.order,
            notes: entry.notes,
            sets,
        });
    }

    Ok(Some(WorkoutDetail {
        id: workout.id,
        user_id: workout.user_id,
        date: workout.date,
        notes: workout.notes,
        created_at: workout.created_at,
        exercises,
    }))
}
