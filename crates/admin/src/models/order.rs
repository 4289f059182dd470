//! Order types as seen by the back-office.
//!
//! Same snapshot semantics as the storefront: item rows were frozen at
//! checkout and are never recomputed here.

use chrono::{DateTime, Utc};
use serde::Serialize;
use talad_core::{
    ChatMessageId, ChatSender, OrderId, OrderItemId, OrderStatus, ProductId, SelectedOptions,
    UserId,
};

/// A placed order with its item snapshots.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub order_number: String,
    pub user_id: UserId,
    pub status: OrderStatus,
    pub total: i64,
    pub shipping_address: serde_json::Value,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One order line, frozen at checkout time.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: i32,
    pub selected_options: SelectedOptions,
    pub unit_price: i64,
    pub line_total: i64,
}

/// A message in an order's chat.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub id: ChatMessageId,
    pub order_id: OrderId,
    pub sender: ChatSender,
    pub body: String,
    pub created_at: DateTime<Utc>,
}
