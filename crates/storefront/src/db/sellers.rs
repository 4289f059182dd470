//! Seller profile reads.

use sqlx::PgPool;

use talad_core::SellerId;

use super::RepositoryError;
use crate::models::catalog::Seller;

#[derive(sqlx::FromRow)]
struct SellerRow {
    id: SellerId,
    name: String,
    slug: String,
    description: Option<String>,
    logo_url: Option<String>,
}

/// Look up an active seller by slug.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn get_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Seller>, RepositoryError> {
    let row: Option<SellerRow> = sqlx::query_as(
        "SELECT id, name, slug, description, logo_url
         FROM sellers
         WHERE slug = $1 AND active",
    )
    .bind(slug)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| Seller {
        id: row.id,
        name: row.name,
        slug: row.slug,
        description: row.description,
        logo_url: row.logo_url,
    }))
}
