//! Order repository: checkout and order history.
//!
//! Checkout is the one place where ordering of writes matters: the order
//! row, its item snapshots, the product stock/sold adjustments, and the
//! cart clear all happen inside a single transaction so a crash can never
//! leave a half-placed order.

use sqlx::PgPool;
use uuid::Uuid;

use talad_core::{
    OrderId, OrderItemId, OrderStatus, ProductId, SelectedOptions, UserId, resolve_price,
};

use super::RepositoryError;
use super::products::load_option_trees;
use crate::models::order::{Order, OrderItem};

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
struct CheckoutLineRow {
    product_id: ProductId,
    product_name: String,
    price: i64,
    discount_percent: i64,
    quantity: i32,
    selected_options: serde_json::Value,
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

/// Repository for buyer-side order operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Turn a cart into an order.
    ///
    /// Unit prices are resolved here, against the product state at checkout
    /// time, and frozen into the item snapshots. Product `sold` goes up and
    /// `stock` goes down (floored at zero) for each line. The cart is
    /// emptied. All of it commits atomically or not at all.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown cart token,
    /// `RepositoryError::Conflict` for an empty cart, and
    /// `RepositoryError::Database` if any statement fails.
    pub async fn checkout(
        &self,
        token: Uuid,
        user_id: UserId,
        shipping_address: &serde_json::Value,
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let cart: Option<i32> = sqlx::query_scalar("SELECT 1 FROM carts WHERE token = $1")
            .bind(token)
            .fetch_optional(&mut *tx)
            .await?;
        if cart.is_none() {
            return Err(RepositoryError::NotFound);
        }

        let lines: Vec<CheckoutLineRow> = sqlx::query_as(
            "SELECT ci.product_id, p.name AS product_name, p.price, p.discount_percent,
                    ci.quantity, ci.selected_options
             FROM cart_items ci
             JOIN products p ON p.id = ci.product_id
             WHERE ci.cart_token = $1
             ORDER BY ci.id",
        )
        .bind(token)
        .fetch_all(&mut *tx)
        .await?;

        if lines.is_empty() {
            return Err(RepositoryError::Conflict("cart is empty".to_owned()));
        }

        let product_ids: Vec<ProductId> = lines.iter().map(|l| l.product_id).collect();
        let trees = load_option_trees(&mut tx, &product_ids).await?;

        let mut total = 0i64;
        let mut snapshots = Vec::with_capacity(lines.len());
        for line in lines {
            let selected: SelectedOptions =
                serde_json::from_value(line.selected_options.clone()).unwrap_or_default();
            let options = trees.get(&line.product_id).map_or(&[][..], Vec::as_slice);
            let unit_price =
                resolve_price(line.price, &selected, options, line.discount_percent);
            total += unit_price * i64::from(line.quantity);
            snapshots.push((line, unit_price));
        }

        let order_number = format!("TLD-{:08}", rand::random::<u32>() % 100_000_000);
        let order_row: OrderRow = sqlx::query_as(
            "INSERT INTO orders (order_number, user_id, status, total, shipping_address)
             VALUES ($1, $2, 'pending', $3, $4)
             RETURNING id, order_number, user_id, status, total, shipping_address,
                       created_at, updated_at",
        )
        .bind(&order_number)
        .bind(user_id)
        .bind(total)
        .bind(shipping_address)
        .fetch_one(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(snapshots.len());
        for (line, unit_price) in snapshots {
            let item_row: OrderItemRow = sqlx::query_as(
                "INSERT INTO order_items
                     (order_id, product_id, product_name, quantity, unit_price, selected_options)
                 VALUES ($1, $2, $3, $4, $5, $6)
                 RETURNING id, order_id, product_id, product_name, quantity, unit_price,
                           selected_options",
            )
            .bind(order_row.id)
            .bind(line.product_id)
            .bind(&line.product_name)
            .bind(line.quantity)
            .bind(unit_price)
            .bind(&line.selected_options)
            .fetch_one(&mut *tx)
            .await?;

            sqlx::query(
                "UPDATE products
                 SET stock = GREATEST(stock - $2, 0), sold = sold + $2, updated_at = NOW()
                 WHERE id = $1",
            )
            .bind(line.product_id)
            .bind(i64::from(line.quantity))
            .execute(&mut *tx)
            .await?;

            items.push(OrderItem::from(item_row));
        }

        sqlx::query("DELETE FROM cart_items WHERE cart_token = $1")
            .bind(token)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(build_order(order_row, items))
    }

    /// Order history for a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let rows: Vec<OrderRow> = sqlx::query_as(
            "SELECT id, order_number, user_id, status, total, shipping_address,
                    created_at, updated_at
             FROM orders
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(self.pool)
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

        let mut items_by_order: std::collections::HashMap<OrderId, Vec<OrderItem>> =
            std::collections::HashMap::new();
        for row in item_rows {
            items_by_order
                .entry(row.order_id)
                .or_default()
                .push(OrderItem::from(row));
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let items = items_by_order.remove(&row.id).unwrap_or_default();
                build_order(row, items)
            })
            .collect())
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
}
