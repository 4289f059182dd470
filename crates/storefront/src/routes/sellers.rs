//! Seller profile route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::db::{self, ProductFilter, ProductRepository};
use crate::error::{AppError, Result};
use crate::models::catalog::Seller;
use crate::models::product::ProductSummary;
use crate::state::AppState;

/// Seller profile payload.
#[derive(Debug, Serialize)]
pub struct SellerResponse {
    pub seller: Seller,
    pub products: Vec<ProductSummary>,
}

/// Seller profile with their active products.
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<SellerResponse>> {
    let seller = db::sellers::get_by_slug(state.pool(), &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("seller {slug} not found")))?;

    let filter = ProductFilter {
        seller: Some(slug),
        per_page: 100,
        page: 1,
        ..ProductFilter::default()
    };
    let (products, _) = ProductRepository::new(state.pool()).list(&filter).await?;

    Ok(Json(SellerResponse { seller, products }))
}
