//! Per-order chat repository.

use sqlx::PgPool;

use talad_core::{ChatMessageId, ChatSender, OrderId};

use super::RepositoryError;
use crate::models::order::ChatMessage;

#[derive(sqlx::FromRow)]
struct MessageRow {
    id: ChatMessageId,
    order_id: OrderId,
    sender: ChatSender,
    body: String,
    created_at: chrono::DateTime<chrono::Utc>,
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

/// Repository for order chat messages.
pub struct ChatRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ChatRepository<'a> {
    /// Create a new chat repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All messages for an order, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown order.
    pub async fn list(&self, order_id: OrderId) -> Result<Vec<ChatMessage>, RepositoryError> {
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

    /// Append a message to an order's chat.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown order.
    pub async fn post(
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
