//! Order management route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use talad_core::{ChatSender, OrderId, OrderStatus};

use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::models::order::{ChatMessage, Order};
use crate::state::AppState;

/// Listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub status: Option<OrderStatus>,
}

/// Paginated listing payload.
#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    pub data: Vec<Order>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

/// Status transition request.
#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: OrderStatus,
}

/// Staff chat reply. `sender` defaults to `admin`; `buyer` is not a valid
/// staff identity.
#[derive(Debug, Deserialize)]
pub struct StaffChatRequest {
    pub body: String,
    pub sender: Option<ChatSender>,
}

/// Order listing, optionally filtered by status.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<OrderListResponse>> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);

    let (data, total) = OrderRepository::new(state.pool())
        .list(query.status, page, per_page)
        .await?;

    Ok(Json(OrderListResponse {
        data,
        total,
        page,
        per_page,
    }))
}

/// Order detail.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<OrderId>) -> Result<Json<Order>> {
    OrderRepository::new(state.pool())
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("order {id} not found")))
}

/// Move an order through its lifecycle.
#[instrument(skip(state))]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<Json<Order>> {
    let order = OrderRepository::new(state.pool())
        .update_status(id, request.status)
        .await?;
    Ok(Json(order))
}

/// Chat messages for an order, oldest first.
pub async fn chat_index(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<Vec<ChatMessage>>> {
    let messages = OrderRepository::new(state.pool()).chat_messages(id).await?;
    Ok(Json(messages))
}

/// Post a staff reply to an order's chat.
pub async fn chat_post(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(request): Json<StaffChatRequest>,
) -> Result<(StatusCode, Json<ChatMessage>)> {
    let body = request.body.trim();
    if body.is_empty() {
        return Err(AppError::BadRequest("message body must not be blank".to_owned()));
    }

    let sender = match request.sender {
        None | Some(ChatSender::Admin) => ChatSender::Admin,
        Some(ChatSender::Seller) => ChatSender::Seller,
        Some(ChatSender::Buyer) => {
            return Err(AppError::BadRequest(
                "staff replies cannot be sent as the buyer".to_owned(),
            ));
        }
    };

    let message = OrderRepository::new(state.pool())
        .post_chat_message(id, sender, body)
        .await?;

    Ok((StatusCode::CREATED, Json(message)))
}
