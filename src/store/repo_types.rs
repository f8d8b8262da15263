use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 hash, not exposed in JSON
    pub created_at: OffsetDateTime,
}

/// One finished quiz attempt. Rows are never updated.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct QuizResult {
    pub id: Uuid,
    pub user_id: Uuid,
    pub score: i32,
    pub total: i32,
    pub passed: bool,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy)]
pub struct NewResult {
    pub user_id: Uuid,
    pub score: i32,
    pub total: i32,
    pub passed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct BestScore {
    pub name: String,
    pub best_score: i32,
    pub total: i32,
}
