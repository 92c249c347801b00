use rusqlite::OptionalExtension;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{constraint_error, AppError, Result};
use crate::models::{Exercise, FromSqliteRow};

#[derive(Clone)]
pub struct ExerciseRepository {
    pool: DbPool,
}

impl ExerciseRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Exercise>> {
        let pool = self.pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM exercises WHERE id = ?")?;
            let result = stmt.query_row([&id], Exercise::from_row).optional()?;
            Ok(result)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_all(&self) -> Result<Vec<Exercise>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM exercises ORDER BY name")?;
            let exercises = stmt
                .query_map([], Exercise::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(exercises)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn create(
        &self,
        name: &str,
        description: &str,
        category: &str,
        default_unit: &str,
    ) -> Result<Exercise> {
        let exercise = Exercise {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            default_unit: default_unit.to_string(),
        };
        let exercise_clone = exercise.clone();

        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO exercises (id, name, description, category, default_unit)
                 VALUES (?, ?, ?, ?, ?)",
                rusqlite::params![
                    exercise_clone.id,
                    exercise_clone.name,
                    exercise_clone.description,
                    exercise_clone.category,
                    exercise_clone.default_unit
                ],
            )
            .map_err(|e| constraint_error(e, "Exercise name already exists"))?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        Ok(exercise)
    }

    pub async fn update(
        &self,
        id: &str,
        name: &str,
        description: &str,
        category: &str,
        default_unit: &str,
    ) -> Result<bool> {
        let pool = self.pool.clone();
        let id = id.to_string();
        let name = name.to_string();
        let description = description.to_string();
        let category = category.to_string();
        let default_unit = default_unit.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn
                .execute(
                    "UPDATE exercises SET name = ?, description = ?, category = ?, default_unit = ?
                     WHERE id = ?",
                    rusqlite::params![name, description, category, default_unit, id],
                )
                .map_err(|e| constraint_error(e, "Exercise name already exists"))?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Delete an exercise. Fails with a Conflict while any workout still
    /// references it (protect-on-delete).
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let pool = self.pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn
                .execute("DELETE FROM exercises WHERE id = ?", [&id])
                .map_err(|e| constraint_error(e, "Exercise is referenced by a workout"))?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;
    use crate::migrations::run_migrations_for_tests;

    fn setup_test_db() -> DbPool {
        let pool = create_memory_pool().expect("Failed to create test database");
        run_migrations_for_tests(&pool).expect("Failed to run migrations");
        pool
    }

    #[tokio::test]
    async fn test_create_exercise() {
        let pool = setup_test_db();
        let repo = ExerciseRepository::new(pool);

        let exercise = repo
            .create("Bench Press", "", "strength", "reps")
            .await
            .unwrap();

        assert_eq!(exercise.name, "Bench Press");
        assert_eq!(exercise.category, "strength");
        assert!(!exercise.id.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_name_is_conflict() {
        let pool = setup_test_db();
        let repo = ExerciseRepository::new(pool);

        repo.create("Squat", "", "strength", "reps").await.unwrap();
        let err = repo
            .create("Squat", "", "strength", "reps")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_find_by_id_not_exists() {
        let pool = setup_test_db();
        let repo = ExerciseRepository::new(pool);

        let found = repo.find_by_id("nonexistent").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_find_all_sorted_by_name() {
        let pool = setup_test_db();
        let repo = ExerciseRepository::new(pool);

        repo.create("Squat", "", "strength", "reps").await.unwrap();
        repo.create("Bench Press", "", "strength", "reps")
            .await
            .unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Bench Press");
        assert_eq!(all[1].name, "Squat");
    }

    #[tokio::test]
    async fn test_update_exercise() {
        let pool = setup_test_db();
        let repo = ExerciseRepository::new(pool);

        let exercise = repo.create("Plank", "", "core", "reps").await.unwrap();
        let updated = repo
            .update(&exercise.id, "Plank", "front plank", "core", "seconds")
            .await
            .unwrap();
        assert!(updated);

        let found = repo.find_by_id(&exercise.id).await.unwrap().unwrap();
        assert_eq!(found.description, "front plank");
        assert_eq!(found.default_unit, "seconds");
    }

    #[tokio::test]
    async fn test_delete_unreferenced_exercise() {
        let pool = setup_test_db();
        let repo = ExerciseRepository::new(pool);

        let exercise = repo.create("Squat", "", "strength", "reps").await.unwrap();
        let deleted = repo.delete(&exercise.id).await.unwrap();
        assert!(deleted);
        assert!(repo.find_by_id(&exercise.id).await.unwrap().is_none());
    }
}
