use axum::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::{BestScore, NewResult, QuizResult, QuizStore, StoreError, User};

/// `QuizStore` backed by the `users` and `results` tables.
#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl QuizStore for PgStore {
    async fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password_hash, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.db)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                StoreError::DuplicateEmail
            }
            other => StoreError::Database(other),
        })?;
        debug!(user_id = %user.id, "user row inserted");
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn record_result(&self, result: NewResult) -> Result<QuizResult, StoreError> {
        let row = sqlx::query_as::<_, QuizResult>(
            r#"
            INSERT INTO results (id, user_id, score, total, passed)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, score, total, passed, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(result.user_id)
        .bind(result.score)
        .bind(result.total)
        .bind(result.passed)
        .fetch_one(&self.db)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                StoreError::UnknownUser(result.user_id)
            }
            other => StoreError::Database(other),
        })?;
        Ok(row)
    }

    async fn best_scores_by_user(&self) -> Result<Vec<BestScore>, StoreError> {
        let rows = sqlx::query_as::<_, BestScore>(
            r#"
            SELECT u.name, MAX(r.score) AS best_score, MAX(r.total) AS total
            FROM results r
            JOIN users u ON r.user_id = u.id
            GROUP BY u.id, u.name
            ORDER BY best_score DESC, u.name ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }
}
