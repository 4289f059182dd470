//! Wishlist route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use talad_core::{ProductId, UserId};

use crate::db::{ProductRepository, WishlistRepository};
use crate::error::{AppError, Result};
use crate::models::product::ProductSummary;
use crate::state::AppState;

/// Add-to-wishlist request.
#[derive(Debug, Deserialize)]
pub struct AddWishlistRequest {
    pub product_id: ProductId,
}

/// Wishlisted products for a user.
pub async fn index(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<Vec<ProductSummary>>> {
    let products = WishlistRepository::new(state.pool()).list(user_id).await?;
    Ok(Json(products))
}

/// Add a product to the wishlist. Idempotent.
pub async fn add(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
    Json(request): Json<AddWishlistRequest>,
) -> Result<StatusCode> {
    ProductRepository::new(state.pool())
        .get(request.product_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("product {} not found", request.product_id))
        })?;

    WishlistRepository::new(state.pool())
        .add(user_id, request.product_id)
        .await?;

    Ok(StatusCode::CREATED)
}

/// Remove a product from the wishlist.
pub async fn remove(
    State(state): State<AppState>,
    Path((user_id, product_id)): Path<(UserId, ProductId)>,
) -> Result<StatusCode> {
    if WishlistRepository::new(state.pool())
        .remove(user_id, product_id)
        .await?
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("wishlist item not found".to_owned()))
    }
}
