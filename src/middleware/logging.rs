//! Request logging middleware.
//!
//! One line per request with method, path, status, latency and who the
//! request ran as. Headers and bodies are never logged, so bearer tokens and
//! passwords stay out of the output.

use crate::auth::{AuthError, Subject};
use axum::{body::Body, http::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, warn};

/// Caller of a finished request, as recorded on the response by the guard
#[derive(Debug, PartialEq, Eq)]
enum Caller<'a> {
    Admitted(&'a str),
    Rejected(&'static str),
    Anonymous,
}

impl<'a> Caller<'a> {
    fn of(response: &'a Response) -> Self {
        if let Some(subject) = response.extensions().get::<Subject>() {
            Caller::Admitted(&subject.id)
        } else if let Some(err) = response.extensions().get::<AuthError>() {
            Caller::Rejected(err.code())
        } else {
            Caller::Anonymous
        }
    }

    fn label(&self) -> &str {
        match self {
            Caller::Admitted(id) => *id,
            Caller::Rejected(code) => *code,
            Caller::Anonymous => "-",
        }
    }
}

/// WARN for 5xx, INFO otherwise. `/health` is skipped.
pub async fn log_requests(request: Request<Body>, next: Next) -> Response {
    if request.uri().path() == "/health" {
        return next.run(request).await;
    }

    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    let latency_ms = start.elapsed().as_millis() as u64;
    let status = response.status();
    let caller = Caller::of(&response);

    if status.is_server_error() {
        warn!(%method, %path, status = status.as_u16(), latency_ms, caller = caller.label(), "Request failed");
    } else {
        info!(%method, %path, status = status.as_u16(), latency_ms, caller = caller.label(), "Request completed");
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_caller_from_response_extensions() {
        let mut admitted = Response::new(Body::empty());
        admitted.extensions_mut().insert(Subject {
            id: "user1".to_string(),
            username: "admin".to_string(),
        });
        assert_eq!(Caller::of(&admitted), Caller::Admitted("user1"));

        let rejected = AuthError::MissingToken.into_response();
        assert_eq!(Caller::of(&rejected), Caller::Rejected("missing_token"));
        assert_eq!(Caller::of(&rejected).label(), "missing_token");

        let public = Response::new(Body::empty());
        assert_eq!(Caller::of(&public), Caller::Anonymous);
        assert_eq!(Caller::of(&public).label(), "-");
    }
}
