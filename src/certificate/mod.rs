use crate::state::AppState;
use axum::Router;

pub mod handlers;
pub mod layout;
pub mod render;

pub fn router() -> Router<AppState> {
    handlers::certificate_routes()
}
