//! Order management for the back-office.
//!
//! The admin never creates orders (checkout lives in the storefront); it
//! lists them, moves them through the status lifecycle, and talks to buyers
//! in the per-order chat.

use std::collections::HashMap;

use sqlx::PgPool;

use talad_core::{
    ChatMessageId, ChatSender, OrderId, OrderItemId, OrderStatus, ProductId, SelectedOptions,
    UserId,
};

use super::RepositoryError;
use crate::models::order::{ChatMessage, Order, OrderItem};

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    order_number: String,
    user_id: UserId,
    status: OrderStatus,
    total: i64,
    shipping_address: serde_json::Value,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(sqlx::FromRow)]
struct OrderItemRow {
    id: OrderItemId,
    order_id: OrderId,
    product_id: ProductId,
    product_name: String,
    quantity: i32,
    unit_price: i64,
    selected_options: serde_json::Value,
}

#[derive(sqlx::FromRow)]
struct MessageRow {
    id: ChatMessageId,
    order_id: OrderId,
    sender: ChatSender,
    body: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        let selected: SelectedOptions =
            serde_json::from_value(row.selected_options).unwrap_or_default();
        Self {
            id: row.id,
            product_id: row.product_id,
            product_name: row.product_name,
            quantity: row.quantity,
            selected_options: selected,
            unit_price: row.unit_price,
            line_total: row.unit_price * i64::from(row.quantity),
        }
    }
}

impl From<MessageRow> for ChatMessage {
    fn from(row: MessageRow) -> Self {
        Self {
            id: row.id,
            order_id: row.order_id,
            sender: row.sender,
            body: row.body,
            created_at: row.created_at,
        }
    }
}

fn build_order(row: OrderRow, items: Vec<OrderItem>) -> Order {
    Order {
        id: row.id,
        order_number: row.order_number,
        user_id: row.user_id,
        status: row.status,
        total: row.total,
        shipping_address: row.shipping_address,
        items,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

/// Repository for back-office order operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List orders, newest first, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list(
        &self,
        status: Option<OrderStatus>,
        page: u32,
        per_page: u32,
    ) -> Result<(Vec<Order>, i64), RepositoryError> {
        let per_page = i64::from(per_page.clamp(1, 100));
        let offset = i64::from(page.max(1) - 1) * per_page;

        let rows: Vec<OrderRow> = sqlx::query_as(
            "SELECT id, order_number, user_id, status, total, shipping_address,
                    created_at, updated_at
             FROM orders
             WHERE ($1::order_status IS NULL OR status = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3",
        )
        .bind(status)
        .bind(per_page)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM orders WHERE ($1::order_status IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(self.pool)
        .await?;

        let order_ids: Vec<i32> = rows.iter().map(|r| r.id.as_i32()).collect();
        let item_rows: Vec<OrderItemRow> = sqlx::query_as(
            "SELECT id, order_id, product_id, product_name, quantity, unit_price,
                    selected_options
             FROM order_items
             WHERE order_id = ANY($1)
             ORDER BY order_id, id",
        )
        .bind(&order_ids)
        .fetch_all(self.pool)
        .await?;

        let mut items_by_order: HashMap<OrderId, Vec<OrderItem>> = HashMap::new();
        for row in item_rows {
            items_by_order
                .entry(row.order_id)
                .or_default()
                .push(OrderItem::from(row));
        }

        let orders = rows
            .into_iter()
            .map(|row| {
                let items = items_by_order.remove(&row.id).unwrap_or_default();
                build_order(row, items)
            })
            .collect();

        Ok((orders, total))
    }

    /// Get one order with its item snapshots.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row: Option<OrderRow> = sqlx::query_as(
            "SELECT id, order_number, user_id, status, total, shipping_address,
                    created_at, updated_at
             FROM orders
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let item_rows: Vec<OrderItemRow> = sqlx::query_as(
            "SELECT id, order_id, product_id, product_name, quantity, unit_price,
                    selected_options
             FROM order_items
             WHERE order_id = $1
             ORDER BY id",
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        Ok(Some(build_order(
            row,
            item_rows.into_iter().map(OrderItem::from).collect(),
        )))
    }

    /// Move an order to a new status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown order.
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let updated = sqlx::query(
            "UPDATE orders SET status = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(status)
        .execute(self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.get(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// All chat messages for an order, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown order.
    pub async fn chat_messages(
        &self,
        order_id: OrderId,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        let exists: Option<i32> = sqlx::query_scalar("SELECT 1 FROM orders WHERE id = $1")
            .bind(order_id)
            .fetch_optional(self.pool)
            .await?;
        if exists.is_none() {
            return Err(RepositoryError::NotFound);
        }

        let rows: Vec<MessageRow> = sqlx::query_as(
            "SELECT id, order_id, sender, body, created_at
             FROM order_chat_messages
             WHERE order_id = $1
             ORDER BY created_at, id",
        )
        .bind(order_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(ChatMessage::from).collect())
    }

    /// Append a staff reply to an order's chat.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown order.
    pub async fn post_chat_message(
        &self,
        order_id: OrderId,
        sender: ChatSender,
        body: &str,
    ) -> Result<ChatMessage, RepositoryError> {
        let row: MessageRow = sqlx::query_as(
            "INSERT INTO order_chat_messages (order_id, sender, body)
             VALUES ($1, $2, $3)
             RETURNING id, order_id, sender, body, created_at",
        )
        .bind(order_id)
        .bind(sender)
        .bind(body)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::NotFound;
            }
            RepositoryError::Database(e)
        })?;

        Ok(ChatMessage::from(row))
    }
}
