use serde::{Deserialize, Serialize};

use super::{catalog::PublicQuestion, leaderboard::LeaderboardEntry, scoring::SubmittedAnswer};
use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub questions: Vec<PublicQuestion>,
}

/// Fields stay untyped: a string, float or missing id is a lookup miss,
/// not a malformed body.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckAnswerRequest {
    pub question_id: Option<serde_json::Value>,
    pub selected_index: Option<serde_json::Value>,
}

impl CheckAnswerRequest {
    pub fn question_id(&self) -> Option<i64> {
        self.question_id.as_ref().and_then(serde_json::Value::as_i64)
    }

    pub fn selected_index(&self) -> Option<i64> {
        self.selected_index.as_ref().and_then(serde_json::Value::as_i64)
    }
}

#[derive(Debug, Serialize)]
pub struct CheckAnswerResponse {
    pub correct: bool,
}

/// `answers` stays untyped until the handler inspects it, so a bad entry is
/// skipped instead of failing the whole submission.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SubmitQuizRequest {
    pub answers: Option<serde_json::Value>,
}

impl SubmitQuizRequest {
    pub fn into_answers(self) -> AppResult<Vec<SubmittedAnswer>> {
        match self.answers {
            Some(serde_json::Value::Array(items)) => Ok(items
                .into_iter()
                .map(|v| serde_json::from_value::<SubmittedAnswer>(v).unwrap_or_default())
                .collect()),
            _ => Err(AppError::Validation("answers array required".into())),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub leaderboard: Vec<LeaderboardEntry>,
}
