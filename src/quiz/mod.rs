use crate::state::AppState;
use axum::Router;

pub mod catalog;
mod dto;
pub mod handlers;
pub mod leaderboard;
pub mod scoring;

pub use catalog::Catalog;

pub fn router() -> Router<AppState> {
    handlers::quiz_routes()
}
