//! Authentication Errors
//! Mission: One taxonomy for login and guard failures, one stable 401 shape

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Token codec failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token signature does not match")]
    BadSignature,

    #[error("token could not be decoded")]
    Malformed,

    #[error("token has expired")]
    Expired,

    #[error("failed to sign token: {0}")]
    Encode(String),
}

/// Failures surfaced to HTTP callers
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("missing authorization token")]
    MissingToken,

    #[error("invalid token")]
    InvalidToken,

    #[error("expired token")]
    ExpiredToken,

    #[error("internal authentication failure")]
    Internal,
}

impl AuthError {
    /// Stable machine-readable code used in guard rejections
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::MissingToken => "missing_token",
            AuthError::InvalidToken => "invalid_token",
            AuthError::ExpiredToken => "expired_token",
            AuthError::Internal => "internal_error",
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::BadSignature | TokenError::Malformed => AuthError::InvalidToken,
            TokenError::Expired => AuthError::ExpiredToken,
            TokenError::Encode(_) => AuthError::Internal,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                json!({ "message": "Invalid username or password" }),
            ),
            AuthError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": self.code(), "message": "Missing authorization token. Use: Bearer {token}" }),
            ),
            AuthError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": self.code(), "message": "Invalid token" }),
            ),
            AuthError::ExpiredToken => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": self.code(), "message": "Token has expired" }),
            ),
            AuthError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "message": "Internal server error" }),
            ),
        };

        let mut response = (status, Json(body)).into_response();
        // Request logging reports the rejection code from here
        response.extensions_mut().insert(self);
        response
    }
}
