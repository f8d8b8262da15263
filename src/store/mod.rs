use axum::async_trait;
use thiserror::Error;
use uuid::Uuid;

#[cfg(test)]
pub mod memory;
pub mod postgres;
pub mod repo_types;

pub use repo_types::{BestScore, NewResult, QuizResult, User};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,

    #[error("unknown user {0}")]
    UnknownUser(Uuid),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Durable storage for users and quiz results.
#[async_trait]
pub trait QuizStore: Send + Sync {
    async fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn record_result(&self, result: NewResult) -> Result<QuizResult, StoreError>;

    /// One row per user with at least one result, best score first.
    async fn best_scores_by_user(&self) -> Result<Vec<BestScore>, StoreError>;
}
