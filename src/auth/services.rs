use tracing::{info, warn};

use super::{
    dto::{AuthResponse, LoginRequest, PublicUser, RegisterRequest},
    jwt::JwtKeys,
    password::{hash_password, verify_password},
};
use crate::{
    error::{AppError, AppResult},
    store::QuizStore,
};

pub async fn register_user(
    store: &dyn QuizStore,
    keys: &JwtKeys,
    req: RegisterRequest,
) -> AppResult<AuthResponse> {
    let name = req.name.trim();
    // Emails are opaque apart from trimming; case-distinct addresses are distinct users.
    let email = req.email.trim();
    if name.is_empty() || email.is_empty() || req.password.is_empty() {
        return Err(AppError::Validation("name, email, password required".into()));
    }

    // The unique index still catches a concurrent registration.
    if store.find_user_by_email(email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(AppError::Conflict("Email already in use".into()));
    }

    let hash = hash_password(&req.password)?;
    let user = store.create_user(name, email, &hash).await?;
    let token = keys.issue(&user)?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(AuthResponse {
        message: "Registered",
        token,
        user: PublicUser::from(user),
    })
}

pub async fn login_user(
    store: &dyn QuizStore,
    keys: &JwtKeys,
    req: LoginRequest,
) -> AppResult<AuthResponse> {
    let email = req.email.trim();
    if email.is_empty() || req.password.is_empty() {
        return Err(AppError::Validation("email, password required".into()));
    }

    let Some(user) = store.find_user_by_email(email).await? else {
        warn!(email = %email, "login unknown email");
        return Err(AppError::Validation("Invalid credentials".into()));
    };

    if !verify_password(&req.password, &user.password_hash)? {
        warn!(email = %email, user_id = %user.id, "login invalid password");
        return Err(AppError::Validation("Invalid credentials".into()));
    }

    let token = keys.issue(&user)?;
    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(AuthResponse {
        message: "Login successful",
        token,
        user: PublicUser::from(user),
    })
}
