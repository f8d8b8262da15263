use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use tracing::warn;

use super::{claims::Claims, jwt::JwtKeys};
use crate::error::AppError;

/// Checks the `Authorization: Bearer <token>` header.
///
/// No header at all is `MissingToken`; a header that is not a bearer token,
/// or a token that fails verification, is `InvalidToken`.
pub fn authorize(headers: &HeaderMap, keys: &JwtKeys) -> Result<Claims, AppError> {
    let header = headers.get(AUTHORIZATION).ok_or(AppError::MissingToken)?;

    let token = header
        .to_str()
        .ok()
        .and_then(|h| h.strip_prefix("Bearer ").or_else(|| h.strip_prefix("bearer ")))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AppError::InvalidToken)?;

    keys.verify(token).map_err(|e| {
        warn!(error = %e, "invalid or expired token");
        AppError::InvalidToken
    })
}

/// Claims of the authenticated caller.
pub struct AuthUser(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        authorize(&parts.headers, &keys).map(AuthUser)
    }
}
