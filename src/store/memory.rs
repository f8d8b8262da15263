use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use axum::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use super::{BestScore, NewResult, QuizResult, QuizStore, StoreError, User};

/// In-process store for tests. Mirrors the Postgres constraints.
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    results: Mutex<Vec<QuizResult>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent lookup fail like a dropped connection.
    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    /// Make every subsequent insert fail like a dropped connection.
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    fn check(flag: &AtomicBool) -> Result<(), StoreError> {
        if flag.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    pub fn results(&self) -> Vec<QuizResult> {
        self.results.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuizStore for MemoryStore {
    async fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, StoreError> {
        Self::check(&self.fail_writes)?;
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == email) {
            return Err(StoreError::DuplicateEmail);
        }
        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Self::check(&self.fail_reads)?;
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn record_result(&self, result: NewResult) -> Result<QuizResult, StoreError> {
        Self::check(&self.fail_writes)?;
        if !self.users.lock().unwrap().iter().any(|u| u.id == result.user_id) {
            return Err(StoreError::UnknownUser(result.user_id));
        }
        let row = QuizResult {
            id: Uuid::new_v4(),
            user_id: result.user_id,
            score: result.score,
            total: result.total,
            passed: result.passed,
            created_at: OffsetDateTime::now_utc(),
        };
        self.results.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn best_scores_by_user(&self) -> Result<Vec<BestScore>, StoreError> {
        Self::check(&self.fail_reads)?;
        let users = self.users.lock().unwrap();
        let results = self.results.lock().unwrap();

        let mut best: HashMap<Uuid, (i32, i32)> = HashMap::new();
        for r in results.iter() {
            let entry = best.entry(r.user_id).or_insert((r.score, r.total));
            entry.0 = entry.0.max(r.score);
            entry.1 = entry.1.max(r.total);
        }

        let mut rows: Vec<BestScore> = users
            .iter()
            .filter_map(|u| {
                best.get(&u.id).map(|&(best_score, total)| BestScore {
                    name: u.name.clone(),
                    best_score,
                    total,
                })
            })
            .collect();
        rows.sort_by(|a, b| b.best_score.cmp(&a.best_score).then_with(|| a.name.cmp(&b.name)));
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_user_rejects_duplicate_email() {
        let store = MemoryStore::new();
        store.create_user("Ann", "ann@example.com", "h").await.unwrap();
        let err = store.create_user("Other", "ann@example.com", "h").await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail));
    }

    #[tokio::test]
    async fn failure_switches_split_reads_from_writes() {
        let store = MemoryStore::new();
        let ann = store.create_user("Ann", "ann@example.com", "h").await.unwrap();

        store.fail_reads();
        assert!(matches!(
            store.find_user_by_email("ann@example.com").await,
            Err(StoreError::Database(_))
        ));
        assert!(matches!(store.best_scores_by_user().await, Err(StoreError::Database(_))));
        store
            .record_result(NewResult { user_id: ann.id, score: 3, total: 10, passed: false })
            .await
            .unwrap();

        store.fail_writes();
        assert!(matches!(
            store.create_user("Bob", "bob@example.com", "h").await,
            Err(StoreError::Database(_))
        ));
        assert_eq!(store.results().len(), 1);
    }

    #[tokio::test]
    async fn record_result_requires_existing_user() {
        let store = MemoryStore::new();
        let missing = Uuid::new_v4();
        let err = store
            .record_result(NewResult { user_id: missing, score: 1, total: 10, passed: false })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UnknownUser(id) if id == missing));
    }

    #[tokio::test]
    async fn best_scores_keep_max_per_user_in_descending_order() {
        let store = MemoryStore::new();
        let ann = store.create_user("Ann", "ann@example.com", "h").await.unwrap();
        let bob = store.create_user("Bob", "bob@example.com", "h").await.unwrap();
        store.create_user("Cid", "cid@example.com", "h").await.unwrap();

        for (user, score) in [(&ann, 4), (&bob, 6), (&ann, 9), (&bob, 2)] {
            store
                .record_result(NewResult { user_id: user.id, score, total: 10, passed: score >= 7 })
                .await
                .unwrap();
        }

        let rows = store.best_scores_by_user().await.unwrap();
        assert_eq!(
            rows,
            vec![
                BestScore { name: "Ann".into(), best_score: 9, total: 10 },
                BestScore { name: "Bob".into(), best_score: 6, total: 10 },
            ]
        );
    }
}
