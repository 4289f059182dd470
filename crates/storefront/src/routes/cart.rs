//! Cart route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use talad_core::{CartItemId, ProductId, SelectedOptions, UserId};

use crate::db::{CartRepository, OrderRepository, ProductRepository};
use crate::error::{AppError, Result};
use crate::models::cart::Cart;
use crate::models::order::Order;
use crate::state::AppState;

/// Payload returned when a cart is minted.
#[derive(Debug, Serialize)]
pub struct CartCreatedResponse {
    pub token: Uuid,
}

/// Add-to-cart request.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub product_id: ProductId,
    pub quantity: Option<i32>,
    #[serde(default)]
    pub selected_options: SelectedOptions,
}

/// Quantity update request.
#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub quantity: i32,
}

/// Checkout request.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub user_id: UserId,
    pub shipping_address: serde_json::Value,
}

/// Mint a new cart token.
pub async fn create(State(state): State<AppState>) -> Result<(StatusCode, Json<CartCreatedResponse>)> {
    let token = CartRepository::new(state.pool()).create().await?;
    Ok((StatusCode::CREATED, Json(CartCreatedResponse { token })))
}

/// Cart view with resolved prices.
pub async fn show(State(state): State<AppState>, Path(token): Path<Uuid>) -> Result<Json<Cart>> {
    CartRepository::new(state.pool())
        .get(token)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("cart not found".to_owned()))
}

/// Add a line to the cart.
///
/// Selections are checked against the product's current option tree so a
/// typo'd label is caught here; the accepted selection is then stored as a
/// snapshot on the line.
#[instrument(skip(state, request))]
pub async fn add_item(
    State(state): State<AppState>,
    Path(token): Path<Uuid>,
    Json(request): Json<AddItemRequest>,
) -> Result<(StatusCode, Json<Cart>)> {
    let quantity = request.quantity.unwrap_or(1);
    if quantity < 1 {
        return Err(AppError::BadRequest("quantity must be at least 1".to_owned()));
    }

    let product = ProductRepository::new(state.pool())
        .get(request.product_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("product {} not found", request.product_id))
        })?;

    for (name, label) in &request.selected_options {
        let known = product
            .options
            .iter()
            .any(|o| o.name == *name && o.values.iter().any(|v| v.value == *label));
        if !known {
            return Err(AppError::BadRequest(format!(
                "unknown option selection \"{name}: {label}\""
            )));
        }
    }

    let repo = CartRepository::new(state.pool());
    repo.add_item(token, request.product_id, quantity, &request.selected_options)
        .await?;

    let cart = repo
        .get(token)
        .await?
        .ok_or_else(|| AppError::NotFound("cart not found".to_owned()))?;

    Ok((StatusCode::CREATED, Json(cart)))
}

/// Update a line's quantity.
pub async fn update_item(
    State(state): State<AppState>,
    Path((token, item_id)): Path<(Uuid, CartItemId)>,
    Json(request): Json<UpdateItemRequest>,
) -> Result<Json<Cart>> {
    if request.quantity < 1 {
        return Err(AppError::BadRequest("quantity must be at least 1".to_owned()));
    }

    let repo = CartRepository::new(state.pool());
    repo.update_quantity(token, item_id, request.quantity).await?;

    let cart = repo
        .get(token)
        .await?
        .ok_or_else(|| AppError::NotFound("cart not found".to_owned()))?;

    Ok(Json(cart))
}

/// Remove a line.
pub async fn remove_item(
    State(state): State<AppState>,
    Path((token, item_id)): Path<(Uuid, CartItemId)>,
) -> Result<Json<Cart>> {
    let repo = CartRepository::new(state.pool());
    if !repo.remove_item(token, item_id).await? {
        return Err(AppError::NotFound("cart item not found".to_owned()));
    }

    let cart = repo
        .get(token)
        .await?
        .ok_or_else(|| AppError::NotFound("cart not found".to_owned()))?;

    Ok(Json(cart))
}

/// Place an order from the cart.
#[instrument(skip(state, request))]
pub async fn checkout(
    State(state): State<AppState>,
    Path(token): Path<Uuid>,
    Json(request): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<Order>)> {
    let order = OrderRepository::new(state.pool())
        .checkout(token, request.user_id, &request.shipping_address)
        .await?;

    Ok((StatusCode::CREATED, Json(order)))
}
