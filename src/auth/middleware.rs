//! Authentication Middleware
//! Mission: Protect API endpoints with bearer token validation

use crate::auth::{error::AuthError, jwt::JwtHandler, models::Subject};
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::debug;

/// Admit/reject decision for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Admit(Subject),
    Reject(AuthError),
}

/// Request filter in front of every protected route
#[derive(Clone)]
pub struct AccessGuard {
    jwt_handler: Arc<JwtHandler>,
}

impl AccessGuard {
    pub fn new(jwt_handler: Arc<JwtHandler>) -> Self {
        Self { jwt_handler }
    }

    pub fn check(&self, headers: &HeaderMap) -> GuardOutcome {
        self.check_at(headers, Utc::now())
    }

    pub fn check_at(&self, headers: &HeaderMap, now: DateTime<Utc>) -> GuardOutcome {
        let Some(token) = extract_bearer(headers) else {
            return GuardOutcome::Reject(AuthError::MissingToken);
        };

        match self.jwt_handler.verify_at(token, now) {
            Ok(claims) => GuardOutcome::Admit(claims.subject()),
            Err(e) => {
                debug!("Rejected bearer token: {}", e);
                GuardOutcome::Reject(e.into())
            }
        }
    }
}

/// Auth middleware that validates bearer tokens
pub async fn auth_middleware(
    State(guard): State<AccessGuard>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    match guard.check(req.headers()) {
        GuardOutcome::Admit(subject) => {
            // Handlers read the subject back via `extract_subject`
            req.extensions_mut().insert(subject.clone());
            let mut response = next.run(req).await;
            // and request logging reads it off the response
            response.extensions_mut().insert(subject);
            Ok(response)
        }
        GuardOutcome::Reject(err) => Err(err),
    }
}

/// Extract the admitted subject from a request (use after auth middleware)
pub fn extract_subject(req: &Request) -> Option<&Subject> {
    req.extensions().get::<Subject>()
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let token = headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?
        .trim();

    (!token.is_empty()).then_some(token)
}
