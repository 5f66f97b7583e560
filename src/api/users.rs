//! User resource handlers (public)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    api::routes::{ApiError, AppState},
    models::{CreateUserRequest, User},
};

const USER_NOT_FOUND: &str = "User not found";

#[derive(Debug, Deserialize)]
pub struct UsersQuery {
    pub limit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteUserResponse {
    pub message: String,
}

/// List users - GET /api/users?limit=N
pub async fn get_users(
    State(state): State<AppState>,
    Query(params): Query<UsersQuery>,
) -> Json<Vec<User>> {
    // Negative limits drop from the end; anything non-numeric matches nothing
    let users = match params.limit.as_deref() {
        None | Some("") => state.users.list(),
        Some(raw) => match raw.trim().parse::<i64>() {
            Ok(limit) if limit >= 0 => {
                state.users.list_limited(usize::try_from(limit).unwrap_or(usize::MAX))
            }
            Ok(limit) => {
                let mut users = state.users.list();
                let dropped = usize::try_from(limit.unsigned_abs()).unwrap_or(usize::MAX);
                users.truncate(users.len().saturating_sub(dropped));
                users
            }
            Err(_) => Vec::new(),
        },
    };
    Json(users)
}

/// Get user - GET /api/users/:id
pub async fn get_user_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    // Non-numeric ids simply match nothing
    id.parse::<i64>()
        .ok()
        .and_then(|id| state.users.find(&id))
        .map(Json)
        .ok_or(ApiError::NotFound(USER_NOT_FOUND))
}

/// Create user - POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = payload
        .into_user(state.user_ids.next())
        .ok_or(ApiError::BadRequest("name, email, and role are required"))?;

    state.users.insert(user.clone());
    info!("✅ Created user: {} ({})", user.name, user.id);

    Ok((StatusCode::CREATED, Json(user)))
}

/// Delete user - DELETE /api/users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteUserResponse>, ApiError> {
    let removed = id
        .parse::<i64>()
        .ok()
        .and_then(|id| state.users.remove(&id))
        .ok_or(ApiError::NotFound(USER_NOT_FOUND))?;

    info!("🗑️  Deleted user: {}", removed.id);

    Ok(Json(DeleteUserResponse {
        message: format!("{} has been successfully deleted.", removed.name),
    }))
}
