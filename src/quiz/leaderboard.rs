use serde::Serialize;

use crate::{
    error::AppResult,
    store::{BestScore, QuizStore},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub name: String,
    pub best_score: i32,
    pub total: i32,
}

impl From<BestScore> for LeaderboardEntry {
    fn from(row: BestScore) -> Self {
        Self {
            name: row.name,
            best_score: row.best_score,
            total: row.total,
        }
    }
}

/// Best score per user, highest first.
pub async fn report(store: &dyn QuizStore) -> AppResult<Vec<LeaderboardEntry>> {
    let rows = store.best_scores_by_user().await?;
    Ok(rows.into_iter().map(LeaderboardEntry::from).collect())
}
