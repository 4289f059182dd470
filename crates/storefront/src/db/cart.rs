//! Cart repository.
//!
//! Carts are identified by an opaque UUID token. Lines store the buyer's
//! option selections as a JSONB snapshot; unit prices are resolved against
//! the current product state on every read.

use sqlx::PgPool;
use uuid::Uuid;

use talad_core::{CartItemId, ProductId, SelectedOptions, resolve_price};

use super::RepositoryError;
use super::products::load_option_trees;
use crate::models::cart::{Cart, CartItem};

#[derive(sqlx::FromRow)]
struct CartItemRow {
    id: CartItemId,
    product_id: ProductId,
    product_name: String,
    image: Option<String>,
    price: i64,
    discount_percent: i64,
    quantity: i32,
    selected_options: serde_json::Value,
}

/// Repository for cart operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Mint a new cart and return its token.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self) -> Result<Uuid, RepositoryError> {
        let token = Uuid::new_v4();
        sqlx::query("INSERT INTO carts (token) VALUES ($1)")
            .bind(token)
            .execute(self.pool)
            .await?;
        Ok(token)
    }

    /// Load a cart with resolved prices. Returns `None` for an unknown
    /// token.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get(&self, token: Uuid) -> Result<Option<Cart>, RepositoryError> {
        if !self.exists(token).await? {
            return Ok(None);
        }

        let rows: Vec<CartItemRow> = sqlx::query_as(
            "SELECT ci.id, ci.product_id, p.name AS product_name, p.image, p.price,
                    p.discount_percent, ci.quantity, ci.selected_options
             FROM cart_items ci
             JOIN products p ON p.id = ci.product_id
             WHERE ci.cart_token = $1
             ORDER BY ci.id",
        )
        .bind(token)
        .fetch_all(self.pool)
        .await?;

        let product_ids: Vec<ProductId> = rows.iter().map(|r| r.product_id).collect();
        let mut conn = self.pool.acquire().await?;
        let trees = load_option_trees(&mut conn, &product_ids).await?;

        let items: Vec<CartItem> = rows
            .into_iter()
            .map(|row| {
                let selected: SelectedOptions =
                    serde_json::from_value(row.selected_options).unwrap_or_default();
                let options = trees.get(&row.product_id).map_or(&[][..], Vec::as_slice);
                let unit_price =
                    resolve_price(row.price, &selected, options, row.discount_percent);
                CartItem {
                    id: row.id,
                    product_id: row.product_id,
                    product_name: row.product_name,
                    image: row.image,
                    quantity: row.quantity,
                    selected_options: selected,
                    unit_price,
                    line_total: unit_price * i64::from(row.quantity),
                }
            })
            .collect();

        let subtotal = items.iter().map(|i| i.line_total).sum();

        Ok(Some(Cart {
            token,
            items,
            subtotal,
        }))
    }

    /// Add a line to a cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown cart token and
    /// `RepositoryError::Database` if the insert fails.
    pub async fn add_item(
        &self,
        token: Uuid,
        product_id: ProductId,
        quantity: i32,
        selected: &SelectedOptions,
    ) -> Result<CartItemId, RepositoryError> {
        if !self.exists(token).await? {
            return Err(RepositoryError::NotFound);
        }

        let selected_json = serde_json::to_value(selected)
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;

        let id: CartItemId = sqlx::query_scalar(
            "INSERT INTO cart_items (cart_token, product_id, quantity, selected_options)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(token)
        .bind(product_id)
        .bind(quantity)
        .bind(selected_json)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    /// Update a line's quantity.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the line doesn't belong to
    /// this cart.
    pub async fn update_quantity(
        &self,
        token: Uuid,
        item_id: CartItemId,
        quantity: i32,
    ) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("UPDATE cart_items SET quantity = $3 WHERE id = $2 AND cart_token = $1")
                .bind(token)
                .bind(item_id)
                .bind(quantity)
                .execute(self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Remove a line. Returns `true` if something was deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn remove_item(
        &self,
        token: Uuid,
        item_id: CartItemId,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE id = $2 AND cart_token = $1")
            .bind(token)
            .bind(item_id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, token: Uuid) -> Result<bool, RepositoryError> {
        let found: Option<i32> = sqlx::query_scalar("SELECT 1 FROM carts WHERE token = $1")
            .bind(token)
            .fetch_optional(self.pool)
            .await?;
        Ok(found.is_some())
    }
}
