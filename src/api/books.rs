//! Book resource handlers (behind the access guard)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::info;
use uuid::Uuid;

use crate::{
    api::routes::{ApiError, AppState},
    models::{Book, CreateBookRequest},
};

/// List books - GET /api/books
pub async fn list_books(State(state): State<AppState>) -> Json<Vec<Book>> {
    Json(state.books.list())
}

/// Get book - GET /api/books/:id
pub async fn get_book_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Book>, ApiError> {
    state
        .books
        .find(id.as_str())
        .map(Json)
        .ok_or(ApiError::NotFound("Book not found"))
}

/// Add book - POST /api/books
pub async fn add_book(
    State(state): State<AppState>,
    Json(payload): Json<CreateBookRequest>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let book = payload
        .into_book(Uuid::new_v4().to_string())
        .ok_or(ApiError::BadRequest(
            "title, author and publishedYear are required",
        ))?;

    state.books.insert(book.clone());
    info!("📚 Added book: {} ({})", book.title, book.id);

    Ok((StatusCode::CREATED, Json(book)))
}
