use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{
        CheckAnswerRequest, CheckAnswerResponse, LeaderboardResponse, QuizResponse,
        SubmitQuizRequest,
    },
    leaderboard,
    scoring::{self, Score},
};
use crate::{auth::AuthUser, error::AppResult, state::AppState};

pub fn quiz_routes() -> Router<AppState> {
    Router::new()
        .route("/quiz", get(get_quiz))
        .route("/check-answer", post(check_answer))
        .route("/submit-quiz", post(submit_quiz))
        .route("/leaderboard", get(get_leaderboard))
}

#[instrument(skip_all)]
pub async fn get_quiz(State(state): State<AppState>, _user: AuthUser) -> Json<QuizResponse> {
    Json(QuizResponse {
        questions: state.catalog.public_view(),
    })
}

#[instrument(skip_all, fields(user_id = %claims.sub))]
pub async fn check_answer(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    payload: Result<Json<CheckAnswerRequest>, JsonRejection>,
) -> AppResult<Json<CheckAnswerResponse>> {
    let Json(req) = payload?;
    let correct = state
        .catalog
        .check_answer(req.question_id(), req.selected_index())?;
    Ok(Json(CheckAnswerResponse { correct }))
}

#[instrument(skip_all, fields(user_id = %claims.sub))]
pub async fn submit_quiz(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    payload: Result<Json<SubmitQuizRequest>, JsonRejection>,
) -> AppResult<Json<Score>> {
    let Json(req) = payload?;
    let answers = req.into_answers()?;
    let score = scoring::submit(state.store.as_ref(), &state.catalog, claims.sub, &answers).await;
    Ok(Json(score))
}

#[instrument(skip_all)]
pub async fn get_leaderboard(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<LeaderboardResponse>> {
    let leaderboard = leaderboard::report(state.store.as_ref()).await?;
    Ok(Json(LeaderboardResponse { leaderboard }))
}
