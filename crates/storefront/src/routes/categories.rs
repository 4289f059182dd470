//! Category route handlers.

use axum::{Json, extract::State};

use crate::db;
use crate::error::Result;
use crate::models::catalog::Category;
use crate::state::AppState;

/// Category list in display order.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = db::categories::list_categories(state.pool()).await?;
    Ok(Json(categories))
}
