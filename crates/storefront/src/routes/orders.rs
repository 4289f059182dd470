//! Order and order-chat route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use talad_core::{ChatSender, OrderId, UserId};

use crate::db::{ChatRepository, OrderRepository};
use crate::error::{AppError, Result};
use crate::models::order::{ChatMessage, Order};
use crate::state::AppState;

/// Chat post request.
#[derive(Debug, Deserialize)]
pub struct PostChatRequest {
    pub body: String,
}

/// Order history for a user, newest first.
#[instrument(skip(state))]
pub async fn index_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool())
        .list_for_user(user_id)
        .await?;
    Ok(Json(orders))
}

/// Order detail with item snapshots.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<OrderId>) -> Result<Json<Order>> {
    OrderRepository::new(state.pool())
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("order {id} not found")))
}

/// Chat messages for an order, oldest first.
pub async fn chat_index(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<Vec<ChatMessage>>> {
    let messages = ChatRepository::new(state.pool()).list(id).await?;
    Ok(Json(messages))
}

/// Post a buyer message to an order's chat.
pub async fn chat_post(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(request): Json<PostChatRequest>,
) -> Result<(StatusCode, Json<ChatMessage>)> {
    let body = request.body.trim();
    if body.is_empty() {
        return Err(AppError::BadRequest("message body must not be blank".to_owned()));
    }

    let message = ChatRepository::new(state.pool())
        .post(id, ChatSender::Buyer, body)
        .await?;

    Ok((StatusCode::CREATED, Json(message)))
}
