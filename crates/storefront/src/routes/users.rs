//! Customer record route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use talad_core::{Email, UserId};

use crate::db;
use crate::error::{AppError, Result};
use crate::models::user::User;
use crate::state::AppState;

/// Customer registration request.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

/// Create a customer record.
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>)> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("name must not be blank".to_owned()));
    }
    let email = Email::parse(&request.email)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let user = db::users::create(state.pool(), name, &email).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Customer record by id.
pub async fn show(State(state): State<AppState>, Path(id): Path<UserId>) -> Result<Json<User>> {
    db::users::get(state.pool(), id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("user {id} not found")))
}
