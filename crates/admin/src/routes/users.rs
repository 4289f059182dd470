//! Customer record route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use talad_core::UserId;

use crate::db;
use crate::error::{AppError, Result};
use crate::models::user::User;
use crate::state::AppState;

/// Listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    /// Name or email search.
    pub q: Option<String>,
}

/// Paginated listing payload.
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub data: Vec<User>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

/// Customer listing with search.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<UserListResponse>> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);

    let (data, total) =
        db::users::list(state.pool(), query.q.as_deref(), page, per_page).await?;

    Ok(Json(UserListResponse {
        data,
        total,
        page,
        per_page,
    }))
}

/// Customer detail.
pub async fn show(State(state): State<AppState>, Path(id): Path<UserId>) -> Result<Json<User>> {
    db::users::get(state.pool(), id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("user {id} not found")))
}
