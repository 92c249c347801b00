use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::FromSqliteRow;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub default_unit: String,
}

impl FromSqliteRow for Exercise {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            category: row.get("category")?,
            default_unit: row.get("default_unit")?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateExercise {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub default_unit: Option<String>,
}

/// Shared by PUT and PATCH; absent fields keep their current value.
#[derive(Debug, Deserialize)]
pub struct UpdateExercise {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub default_unit: Option<String>,
}
