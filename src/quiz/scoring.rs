use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use super::catalog::Catalog;
use crate::store::{NewResult, QuizStore};

/// Correct answers needed to pass. Independent of the catalog size.
pub const PASS_THRESHOLD: usize = 7;

/// One answer in a submission. Entries missing either field never score.
#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubmittedAnswer {
    pub question_id: Option<i64>,
    pub selected_index: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Score {
    pub total: usize,
    pub correct: usize,
    pub passed: bool,
}

/// Grades answers against the catalog.
///
/// Unknown question ids are skipped. A question counts once per submission;
/// later answers to the same id are ignored.
pub fn score(catalog: &Catalog, answers: &[SubmittedAnswer]) -> Score {
    let mut seen = HashSet::new();
    let mut correct = 0;
    for answer in answers {
        let (Some(question_id), Some(selected)) = (answer.question_id, answer.selected_index) else {
            continue;
        };
        let Some(question) = catalog.find(question_id) else {
            continue;
        };
        if !seen.insert(question.id) {
            continue;
        }
        if question.is_correct(selected) {
            correct += 1;
        }
    }
    Score {
        total: catalog.len(),
        correct,
        passed: correct >= PASS_THRESHOLD,
    }
}

/// Scores a submission and records it for the leaderboard.
///
/// A failed write is logged; the caller always gets the score.
pub async fn submit(
    store: &dyn QuizStore,
    catalog: &Catalog,
    user_id: Uuid,
    answers: &[SubmittedAnswer],
) -> Score {
    let result = score(catalog, answers);
    let record = NewResult {
        user_id,
        score: result.correct as i32,
        total: result.total as i32,
        passed: result.passed,
    };
    match store.record_result(record).await {
        Ok(row) => info!(
            result_id = %row.id,
            user_id = %user_id,
            correct = result.correct,
            passed = result.passed,
            "quiz result recorded"
        ),
        Err(e) => error!(error = %e, user_id = %user_id, "failed to record quiz result"),
    }
    result
}
