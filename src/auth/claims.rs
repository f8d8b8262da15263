use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT payload carried by every bearer token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub sub: Uuid,
    /// Display name at issue time.
    pub name: String,
    pub email: String,
    /// Unix seconds.
    pub iat: usize,
    pub exp: usize,
    pub iss: String,
    pub aud: String,
}
