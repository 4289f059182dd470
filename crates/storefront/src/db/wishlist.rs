//! Wishlist repository.

use sqlx::PgPool;

use talad_core::{ProductId, UserId, apply_discount};

use super::RepositoryError;
use crate::models::product::ProductSummary;

#[derive(sqlx::FromRow)]
struct WishlistProductRow {
    id: ProductId,
    name: String,
    price: i64,
    discount_percent: i64,
    image: Option<String>,
    rating: f64,
    sold: i64,
}

/// Repository for a user's wishlist.
pub struct WishlistRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> WishlistRepository<'a> {
    /// Create a new wishlist repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Wishlisted products that are still active, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<ProductSummary>, RepositoryError> {
        let rows: Vec<WishlistProductRow> = sqlx::query_as(
            "SELECT p.id, p.name, p.price, p.discount_percent, p.image, p.rating, p.sold
             FROM wishlist_items wi
             JOIN products p ON p.id = wi.product_id
             WHERE wi.user_id = $1 AND p.status = 'active'
             ORDER BY wi.created_at DESC, wi.id DESC",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| ProductSummary {
                id: row.id,
                name: row.name,
                price: row.price,
                discount_percent: row.discount_percent,
                display_price: apply_discount(row.price, row.discount_percent),
                image: row.image,
                rating: row.rating,
                sold: row.sold,
            })
            .collect())
    }

    /// Add a product to the wishlist. Adding twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user or product doesn't
    /// exist.
    pub async fn add(&self, user_id: UserId, product_id: ProductId) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO wishlist_items (user_id, product_id)
             VALUES ($1, $2)
             ON CONFLICT (user_id, product_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(product_id)
        .execute(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::NotFound;
            }
            RepositoryError::Database(e)
        })?;

        Ok(())
    }

    /// Remove a product from the wishlist. Returns `true` if something was
    /// deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn remove(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<bool, RepositoryError> {
        let result =
            sqlx::query("DELETE FROM wishlist_items WHERE user_id = $1 AND product_id = $2")
                .bind(user_id)
                .bind(product_id)
                .execute(self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
