//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use talad_core::{ProductId, SelectedOptions, resolve_price};

use crate::db::{ProductFilter, ProductRepository, ProductSort};
use crate::error::{AppError, Result};
use crate::models::product::{Product, ProductSummary};
use crate::state::AppState;

/// Listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    /// Category slug.
    pub category: Option<String>,
    /// Seller slug.
    pub seller: Option<String>,
    /// Name search.
    pub q: Option<String>,
    pub sort: Option<ProductSort>,
}

/// Paginated listing payload.
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub data: Vec<ProductSummary>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

/// Price quote request: the buyer's option selections.
#[derive(Debug, Deserialize)]
pub struct PriceQuoteRequest {
    #[serde(default)]
    pub selected_options: SelectedOptions,
}

/// Price quote payload.
#[derive(Debug, Serialize)]
pub struct PriceQuoteResponse {
    /// Final unit price in whole baht.
    pub price: i64,
}

/// Product listing with filters, sort, and pagination.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ProductListResponse>> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);

    let filter = ProductFilter {
        category: query.category,
        seller: query.seller,
        search: query.q,
        sort: query.sort.unwrap_or_default(),
        page,
        per_page,
    };

    let (data, total) = ProductRepository::new(state.pool()).list(&filter).await?;

    Ok(Json(ProductListResponse {
        data,
        total,
        page,
        per_page,
    }))
}

/// Product detail with the full option tree.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    ProductRepository::new(state.pool())
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id} not found")))
}

/// Resolve the final price for a set of option selections.
///
/// Selections that no longer match the product (stale cart state) are
/// ignored rather than rejected - the quote is always answerable.
#[instrument(skip(state))]
pub async fn quote_price(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(request): Json<PriceQuoteRequest>,
) -> Result<Json<PriceQuoteResponse>> {
    let product = ProductRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id} not found")))?;

    let price = resolve_price(
        product.price,
        &request.selected_options,
        &product.options,
        product.discount_percent,
    );

    Ok(Json(PriceQuoteResponse { price }))
}
