//! Authentication API Endpoints
//! Mission: Provide the login endpoint and the current-subject lookup

use crate::auth::{
    authenticator::Authenticator,
    error::AuthError,
    middleware::extract_subject,
    models::{Credentials, LoginResponse, Subject},
};
use axum::{
    extract::{rejection::JsonRejection, Request, State},
    Json,
};
use tracing::{debug, info};

/// Login endpoint - POST /login
pub async fn login(
    State(authenticator): State<Authenticator>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<LoginResponse>, AuthError> {
    // An unreadable body is just a login with no credentials
    let credentials = match payload {
        Ok(Json(credentials)) => credentials,
        Err(rejection) => {
            debug!("Login body rejected: status {}", rejection.status());
            Credentials::default()
        }
    };
    info!("🔐 Login attempt: {}", credentials.username);

    // bcrypt verification blocks; run it on the blocking pool
    let issued = tokio::task::spawn_blocking(move || authenticator.login(&credentials))
        .await
        .map_err(|e| {
            tracing::error!("Login task failed: {}", e);
            AuthError::Internal
        })??;

    Ok(Json(LoginResponse::from(issued)))
}

/// Get current subject - GET /api/auth/me
pub async fn get_current_user(req: Request) -> Result<Json<Subject>, AuthError> {
    let subject = extract_subject(&req).ok_or(AuthError::MissingToken)?;
    Ok(Json(subject.clone()))
}
