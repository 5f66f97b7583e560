use axum::{
    http::StatusCode,
    middleware,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::{
    api::{books, docs, users},
    auth::{api as auth_api, auth_middleware, AccessGuard, Authenticator},
    collections::{Collection, TimestampIds},
    middleware::log_requests,
    models::{Book, User},
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<Collection<User>>,
    pub user_ids: Arc<TimestampIds>,
    pub books: Arc<Collection<Book>>,
    pub authenticator: Authenticator,
    pub guard: AccessGuard,
}

impl AppState {
    /// State with the seeded users and books
    pub fn new(authenticator: Authenticator, guard: AccessGuard) -> Self {
        Self {
            users: Arc::new(Collection::new(User::seed())),
            user_ids: Arc::new(TimestampIds::default()),
            books: Arc::new(Collection::new(Book::seed())),
            authenticator,
            guard,
        }
    }
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    // Login has its own state: only the authenticator
    let auth_router = Router::new()
        .route("/login", post(auth_api::login))
        .with_state(state.authenticator.clone());

    let protected_routes = Router::new()
        .route("/api/books", get(books::list_books).post(books::add_book))
        .route("/api/books/:id", get(books::get_book_by_id))
        .route("/api/auth/me", get(auth_api::get_current_user))
        .route_layer(middleware::from_fn_with_state(
            state.guard.clone(),
            auth_middleware,
        ))
        .with_state(state.clone());

    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/api/users", get(users::get_users).post(users::create_user))
        .route(
            "/api/users/:id",
            get(users::get_user_by_id).delete(users::delete_user),
        )
        .route("/api-docs/openapi.json", get(docs::openapi))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(auth_router)
        .layer(middleware::from_fn(log_requests))
        .layer(CorsLayer::permissive())
}

// ===== Route Handlers =====

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

// ===== Error Handling =====

#[derive(Debug, PartialEq, Eq)]
pub enum ApiError {
    NotFound(&'static str),
    BadRequest(&'static str),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
