//! Seller management route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use talad_core::SellerId;

use crate::db;
use crate::error::{AppError, Result};
use crate::models::catalog::Seller;
use crate::state::AppState;

/// Seller submission.
#[derive(Debug, Deserialize)]
pub struct SellerPayload {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
}

impl SellerPayload {
    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("name must not be blank".to_owned()));
        }
        if self.slug.trim().is_empty() {
            return Err(AppError::Validation("slug must not be blank".to_owned()));
        }
        Ok(())
    }
}

/// Seller list.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Seller>>> {
    Ok(Json(db::sellers::list(state.pool()).await?))
}

/// Create a seller.
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<SellerPayload>,
) -> Result<(StatusCode, Json<Seller>)> {
    payload.validate()?;
    let seller = db::sellers::create(
        state.pool(),
        payload.name.trim(),
        payload.slug.trim(),
        payload.description.as_deref(),
        payload.logo_url.as_deref(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(seller)))
}

/// Update a seller's profile.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<SellerId>,
    Json(payload): Json<SellerPayload>,
) -> Result<Json<Seller>> {
    payload.validate()?;
    let seller = db::sellers::update(
        state.pool(),
        id,
        payload.name.trim(),
        payload.slug.trim(),
        payload.description.as_deref(),
        payload.logo_url.as_deref(),
    )
    .await?;
    Ok(Json(seller))
}

/// Deactivate a seller.
pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<SellerId>,
) -> Result<StatusCode> {
    if db::sellers::deactivate(state.pool(), id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("seller {id} not found")))
    }
}
