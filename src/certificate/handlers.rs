use axum::{
    extract::{rejection::QueryRejection, Query},
    http::header,
    response::IntoResponse,
    routing::get,
    Router,
};
use serde::Deserialize;
use time::OffsetDateTime;
use tracing::{info, instrument};

use super::{
    layout::{CertificateRequest, Outcome},
    render::render,
};
use crate::{auth::AuthUser, error::AppResult, state::AppState};

#[derive(Debug, Default, Deserialize)]
pub struct CertificateQuery {
    pub name: Option<String>,
    pub result: Option<String>,
    pub score: Option<String>,
}

pub fn certificate_routes() -> Router<AppState> {
    Router::new().route("/certificate", get(get_certificate))
}

#[instrument(skip_all, fields(user_id = %claims.sub))]
pub async fn get_certificate(
    AuthUser(claims): AuthUser,
    query: Result<Query<CertificateQuery>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(query) = query?;
    let name = query
        .name
        .filter(|n| !n.trim().is_empty())
        .or_else(|| Some(claims.name.clone()).filter(|n| !n.trim().is_empty()))
        .unwrap_or_else(|| "Candidate".to_string());
    let req = CertificateRequest {
        outcome: Outcome::parse(query.result.as_deref()),
        score: query.score.unwrap_or_default(),
        name,
    };

    let pdf = render(&req, OffsetDateTime::now_utc().date())?;
    info!(outcome = ?req.outcome, size = pdf.len(), "certificate issued");

    let disposition = format!("attachment; filename=\"{}\"", attachment_name(&req.name));
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        pdf,
    ))
}

/// `<name>_certificate.pdf`, whitespace runs as `_`, header-unsafe characters dropped.
fn attachment_name(name: &str) -> String {
    let stem: String = name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        .collect();
    if stem.is_empty() {
        "certificate.pdf".to_string()
    } else {
        format!("{stem}_certificate.pdf")
    }
}
