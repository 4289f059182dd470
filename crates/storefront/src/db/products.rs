//! Product read access for the storefront.
//!
//! Only `active` products are served here. The option tree is loaded in
//! its persisted (`position`) order - price resolution depends on that
//! order, so it must survive the trip from disk intact.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};

use talad_core::{
    CategoryId, OptionValue, PriceType, ProductId, ProductOption, ProductOptionId, SellerId,
    apply_discount,
};

use super::RepositoryError;
use crate::models::product::{Product, ProductSummary};

/// Sort orders accepted by the product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    #[default]
    Latest,
    PriceAsc,
    PriceDesc,
    BestSelling,
}

impl ProductSort {
    /// SQL fragment for the ORDER BY clause. Static strings only - nothing
    /// user-supplied is ever interpolated into a query.
    const fn order_clause(self) -> &'static str {
        match self {
            Self::Latest => "p.created_at DESC, p.id DESC",
            Self::PriceAsc => "p.price ASC, p.id ASC",
            Self::PriceDesc => "p.price DESC, p.id ASC",
            Self::BestSelling => "p.sold DESC, p.id ASC",
        }
    }
}

/// Filters for the storefront product listing.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Category slug.
    pub category: Option<String>,
    /// Seller slug.
    pub seller: Option<String>,
    /// Case-insensitive name substring.
    pub search: Option<String>,
    pub sort: ProductSort,
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
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct SummaryRow {
    id: ProductId,
    name: String,
    price: i64,
    discount_percent: i64,
    image: Option<String>,
    rating: f64,
    sold: i64,
}

impl From<SummaryRow> for ProductSummary {
    fn from(row: SummaryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            price: row.price,
            discount_percent: row.discount_percent,
            display_price: apply_discount(row.price, row.discount_percent),
            image: row.image,
            rating: row.rating,
            sold: row.sold,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OptionRow {
    id: ProductOptionId,
    product_id: ProductId,
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

/// Repository for storefront product reads.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List active products matching `filter`, returning the page of
    /// summaries plus the total match count.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list(
        &self,
        filter: &ProductFilter,
    ) -> Result<(Vec<ProductSummary>, i64), RepositoryError> {
        let per_page = i64::from(filter.per_page.clamp(1, 100));
        let offset = i64::from(filter.page.max(1) - 1) * per_page;

        let sql = format!(
            "SELECT p.id, p.name, p.price, p.discount_percent, p.image, p.rating, p.sold
             FROM products p
             LEFT JOIN categories c ON c.id = p.category_id
             LEFT JOIN sellers s ON s.id = p.seller_id
             WHERE p.status = 'active'
               AND ($1::text IS NULL OR c.slug = $1)
               AND ($2::text IS NULL OR s.slug = $2)
               AND ($3::text IS NULL OR p.name ILIKE '%' || $3 || '%')
             ORDER BY {}
             LIMIT $4 OFFSET $5",
            filter.sort.order_clause()
        );

        let rows: Vec<SummaryRow> = sqlx::query_as(&sql)
            .bind(filter.category.as_deref())
            .bind(filter.seller.as_deref())
            .bind(filter.search.as_deref())
            .bind(per_page)
            .bind(offset)
            .fetch_all(self.pool)
            .await?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*)
             FROM products p
             LEFT JOIN categories c ON c.id = p.category_id
             LEFT JOIN sellers s ON s.id = p.seller_id
             WHERE p.status = 'active'
               AND ($1::text IS NULL OR c.slug = $1)
               AND ($2::text IS NULL OR s.slug = $2)
               AND ($3::text IS NULL OR p.name ILIKE '%' || $3 || '%')",
        )
        .bind(filter.category.as_deref())
        .bind(filter.seller.as_deref())
        .bind(filter.search.as_deref())
        .fetch_one(self.pool)
        .await?;

        Ok((rows.into_iter().map(ProductSummary::from).collect(), total))
    }

    /// Get an active product by ID with its full option tree.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(
            "SELECT p.id, p.seller_id, p.category_id, p.name, p.description, p.price,
                    p.discount_percent, p.image, p.images, p.rating, p.reviews, p.sold,
                    p.stock, p.created_at, p.updated_at
             FROM products p
             WHERE p.id = $1 AND p.status = 'active'",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut conn = self.pool.acquire().await?;
        let mut trees = load_option_trees(&mut conn, &[row.id]).await?;
        let options = trees.remove(&row.id).unwrap_or_default();

        Ok(Some(Product {
            display_price: apply_discount(row.price, row.discount_percent),
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
            created_at: row.created_at,
            updated_at: row.updated_at,
        }))
    }
}

/// Load the canonical option trees for a set of products, keyed by product.
///
/// Options and values come back in their `position` order; an option row
/// that somehow has no values is skipped rather than served broken.
pub(crate) async fn load_option_trees(
    conn: &mut PgConnection,
    product_ids: &[ProductId],
) -> Result<HashMap<ProductId, Vec<ProductOption>>, RepositoryError> {
    if product_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let ids: Vec<i32> = product_ids.iter().map(ProductId::as_i32).collect();
    let option_rows: Vec<OptionRow> = sqlx::query_as(
        "SELECT id, product_id, name
         FROM product_options
         WHERE product_id = ANY($1)
         ORDER BY product_id, position",
    )
    .bind(&ids)
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

    let mut trees: HashMap<ProductId, Vec<ProductOption>> = HashMap::new();
    for row in option_rows {
        let values = values_by_option.remove(&row.id).unwrap_or_default();
        if values.is_empty() {
            continue;
        }
        trees.entry(row.product_id).or_default().push(ProductOption {
            name: row.name,
            values,
        });
    }

    Ok(trees)
}
