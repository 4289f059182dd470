//! Product write access for the back-office.
//!
//! Option trees are replaced wholesale on every update: there is no
//! incremental option editing, the submission always carries the complete
//! tree and persistence deletes the old rows and recreates them in
//! submitted order. The delete + recreate always runs inside the same
//! transaction as the product row write, so a crash mid-update cannot
//! leave a product with a partial tree.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};

use talad_core::{
    CategoryId, OptionValue, PriceType, ProductId, ProductOption, ProductOptionId, ProductStatus,
    SellerId,
};

use super::RepositoryError;
use crate::models::product::{AdminProduct, AdminProductSummary, NewProduct};

/// Filters for the admin product listing.
#[derive(Debug, Clone, Default)]
pub struct AdminProductFilter {
    pub status: Option<ProductStatus>,
    pub search: Option<String>,
    /// 1-based page number.
    pub page: u32,
    pub per_page: u32,
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    seller_id: SellerId,
    category_id: Option<CategoryId>,
    name: String,
    description: Option<String>,
    price: i64,
    discount_percent: i64,
    image: Option<String>,
    images: Vec<String>,
    rating: f64,
    reviews: i64,
    sold: i64,
    stock: i64,
    status: ProductStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct SummaryRow {
    id: ProductId,
    name: String,
    price: i64,
    discount_percent: i64,
    stock: i64,
    sold: i64,
    status: ProductStatus,
    updated_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct OptionRow {
    id: ProductOptionId,
    name: String,
}

#[derive(sqlx::FromRow)]
struct ValueRow {
    option_id: ProductOptionId,
    value: String,
    price: i64,
    price_type: PriceType,
    stock: i64,
    sku: Option<String>,
}

fn build_product(row: ProductRow, options: Vec<ProductOption>) -> AdminProduct {
    AdminProduct {
        id: row.id,
        seller_id: row.seller_id,
        category_id: row.category_id,
        name: row.name,
        description: row.description,
        price: row.price,
        discount_percent: row.discount_percent,
        image: row.image,
        images: row.images,
        options,
        rating: row.rating,
        reviews: row.reviews,
        sold: row.sold,
        stock: row.stock,
        status: row.status,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

/// Repository for back-office product operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products of any status, newest change first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list(
        &self,
        filter: &AdminProductFilter,
    ) -> Result<(Vec<AdminProductSummary>, i64), RepositoryError> {
        let per_page = i64::from(filter.per_page.clamp(1, 100));
        let offset = i64::from(filter.page.max(1) - 1) * per_page;

        let rows: Vec<SummaryRow> = sqlx::query_as(
            "SELECT id, name, price, discount_percent, stock, sold, status, updated_at
             FROM products
             WHERE ($1::product_status IS NULL OR status = $1)
               AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%')
             ORDER BY updated_at DESC, id DESC
             LIMIT $3 OFFSET $4",
        )
        .bind(filter.status)
        .bind(filter.search.as_deref())
        .bind(per_page)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*)
             FROM products
             WHERE ($1::product_status IS NULL OR status = $1)
               AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%')",
        )
        .bind(filter.status)
        .bind(filter.search.as_deref())
        .fetch_one(self.pool)
        .await?;

        let summaries = rows
            .into_iter()
            .map(|row| AdminProductSummary {
                id: row.id,
                name: row.name,
                price: row.price,
                discount_percent: row.discount_percent,
                stock: row.stock,
                sold: row.sold,
                status: row.status,
                updated_at: row.updated_at,
            })
            .collect();

        Ok((summaries, total))
    }

    /// Get a product of any status with its full option tree.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<AdminProduct>, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(
            "SELECT id, seller_id, category_id, name, description, price, discount_percent,
                    image, images, rating, reviews, sold, stock, status, created_at, updated_at
             FROM products
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut conn = self.pool.acquire().await?;
        let options = load_options(&mut conn, row.id).await?;
        Ok(Some(build_product(row, options)))
    }

    /// Create a product together with its option tree.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the seller or category
    /// reference is invalid, `RepositoryError::Database` otherwise.
    pub async fn create(&self, data: &NewProduct) -> Result<AdminProduct, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row: ProductRow = sqlx::query_as(
            "INSERT INTO products
                 (seller_id, category_id, name, description, price, discount_percent,
                  image, images, stock, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING id, seller_id, category_id, name, description, price, discount_percent,
                       image, images, rating, reviews, sold, stock, status,
                       created_at, updated_at",
        )
        .bind(data.seller_id)
        .bind(data.category_id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.price)
        .bind(data.discount_percent)
        .bind(&data.image)
        .bind(&data.images)
        .bind(data.stock)
        .bind(data.status)
        .fetch_one(&mut *tx)
        .await
        .map_err(foreign_key_conflict)?;

        replace_options(&mut tx, row.id, &data.options).await?;

        tx.commit().await?;

        Ok(build_product(row, data.options.clone()))
    }

    /// Update a product, replacing its option tree wholesale.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown product,
    /// `RepositoryError::Conflict` for an invalid seller/category
    /// reference, `RepositoryError::Database` otherwise.
    pub async fn update(
        &self,
        id: ProductId,
        data: &NewProduct,
    ) -> Result<Option<AdminProduct>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row: Option<ProductRow> = sqlx::query_as(
            "UPDATE products
             SET seller_id = $2, category_id = $3, name = $4, description = $5, price = $6,
                 discount_percent = $7, image = $8, images = $9, stock = $10, status = $11,
                 updated_at = NOW()
             WHERE id = $1
             RETURNING id, seller_id, category_id, name, description, price, discount_percent,
                       image, images, rating, reviews, sold, stock, status,
                       created_at, updated_at",
        )
        .bind(id)
        .bind(data.seller_id)
        .bind(data.category_id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.price)
        .bind(data.discount_percent)
        .bind(&data.image)
        .bind(&data.images)
        .bind(data.stock)
        .bind(data.status)
        .fetch_optional(&mut *tx)
        .await
        .map_err(foreign_key_conflict)?;

        let Some(row) = row else {
            return Ok(None);
        };

        replace_options(&mut tx, row.id, &data.options).await?;

        tx.commit().await?;

        Ok(Some(build_product(row, data.options.clone())))
    }

    /// Archive a product (it disappears from the storefront but keeps its
    /// id for order snapshots). Returns `true` if something changed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn archive(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "UPDATE products SET status = 'archived', updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Map foreign-key violations (bad seller/category reference) to `Conflict`.
fn foreign_key_conflict(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_foreign_key_violation()
    {
        return RepositoryError::Conflict("unknown seller or category reference".to_owned());
    }
    RepositoryError::Database(e)
}

/// Replace a product's option tree: delete everything, then insert the
/// canonical list in submitted order. Values cascade with their option
/// rows, so one delete suffices.
async fn replace_options(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    product_id: ProductId,
    options: &[ProductOption],
) -> Result<(), RepositoryError> {
    sqlx::query("DELETE FROM product_options WHERE product_id = $1")
        .bind(product_id)
        .execute(&mut **tx)
        .await?;

    for (position, option) in options.iter().enumerate() {
        let option_id: ProductOptionId = sqlx::query_scalar(
            "INSERT INTO product_options (product_id, name, position)
             VALUES ($1, $2, $3)
             RETURNING id",
        )
        .bind(product_id)
        .bind(&option.name)
        .bind(i32::try_from(position).unwrap_or(i32::MAX))
        .fetch_one(&mut **tx)
        .await?;

        for (value_position, value) in option.values.iter().enumerate() {
            sqlx::query(
                "INSERT INTO product_option_values
                     (option_id, value, price, price_type, stock, sku, position)
                 VALUES ($1, $2, $3, $4, $5, $6, $7)",
            )
            .bind(option_id)
            .bind(&value.value)
            .bind(value.price)
            .bind(value.price_type)
            .bind(value.stock)
            .bind(&value.sku)
            .bind(i32::try_from(value_position).unwrap_or(i32::MAX))
            .execute(&mut **tx)
            .await?;
        }
    }

    Ok(())
}

/// Load one product's canonical option tree in `position` order.
async fn load_options(
    conn: &mut PgConnection,
    product_id: ProductId,
) -> Result<Vec<ProductOption>, RepositoryError> {
    let option_rows: Vec<OptionRow> = sqlx::query_as(
        "SELECT id, name
         FROM product_options
         WHERE product_id = $1
         ORDER BY position",
    )
    .bind(product_id)
    .fetch_all(&mut *conn)
    .await?;

    let option_ids: Vec<i32> = option_rows.iter().map(|r| r.id.as_i32()).collect();
    let value_rows: Vec<ValueRow> = sqlx::query_as(
        "SELECT option_id, value, price, price_type, stock, sku
         FROM product_option_values
         WHERE option_id = ANY($1)
         ORDER BY option_id, position",
    )
    .bind(&option_ids)
    .fetch_all(&mut *conn)
    .await?;

    let mut values_by_option: HashMap<ProductOptionId, Vec<OptionValue>> = HashMap::new();
    for row in value_rows {
        values_by_option
            .entry(row.option_id)
            .or_default()
            .push(OptionValue {
                value: row.value,
                price: row.price,
                price_type: row.price_type,
                stock: row.stock,
                sku: row.sku,
            });
    }

    Ok(option_rows
        .into_iter()
        .filter_map(|row| {
            let values = values_by_option.remove(&row.id)?;
            Some(ProductOption {
                name: row.name,
                values,
            })
        })
        .collect())
}
