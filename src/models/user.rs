use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::FromSqliteRow;
use crate::error::{AppError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_staff: bool,
    pub age: Option<i64>,
    pub weight: Option<i64>,
    pub height: Option<i64>,
    pub date_joined: DateTime<Utc>,
}

impl FromSqliteRow for User {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            username: row.get("username")?,
            email: row.get("email")?,
            password_hash: row.get("password_hash")?,
            is_staff: row.get("is_staff")?,
            age: row.get("age")?,
            weight: row.get("weight")?,
            height: row.get("height")?,
            date_joined: row.get("date_joined")?,
        })
    }
}

/// Profile shape returned by `/me/`, without the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub email: String,
    pub is_staff: bool,
    pub age: Option<i64>,
    pub weight: Option<i64>,
    pub height: Option<i64>,
    pub date_joined: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            is_staff: user.is_staff,
            age: user.age,
            weight: user.weight,
            height: user.height,
            date_joined: user.date_joined,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterUser {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub age: Option<i64>,
    pub weight: Option<i64>,
    pub height: Option<i64>,
}

impl RegisterUser {
    /// Check required fields and the documented profile ranges:
    /// age 0-130 years, weight 1-1000 kg, height 1-300 cm.
    pub fn validate(&self) -> Result<(&str, &str)> {
        let username = self
            .username
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| {
                AppError::Validation("Username and password are required".to_string())
            })?;
        let password = self
            .password
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| {
                AppError::Validation("Username and password are required".to_string())
            })?;

        if let Some(age) = self.age {
            if !(0..=130).contains(&age) {
                return Err(AppError::Validation("age must be 0-130".to_string()));
            }
        }
        if let Some(weight) = self.weight {
            if !(1..=1000).contains(&weight) {
                return Err(AppError::Validation("weight must be 1-1000".to_string()));
            }
        }
        if let Some(height) = self.height {
            if !(1..=300).contains(&height) {
                return Err(AppError::Validation("height must be 1-300".to_string()));
            }
        }

        Ok((username, password))
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}
