//! Seller management.

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
    active: bool,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<SellerRow> for Seller {
    fn from(row: SellerRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            slug: row.slug,
            description: row.description,
            logo_url: row.logo_url,
            active: row.active,
            created_at: row.created_at,
        }
    }
}

const SELLER_COLUMNS: &str = "id, name, slug, description, logo_url, active, created_at";

/// All sellers, active or not, newest first.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn list(pool: &PgPool) -> Result<Vec<Seller>, RepositoryError> {
    let sql = format!("SELECT {SELLER_COLUMNS} FROM sellers ORDER BY created_at DESC, id DESC");
    let rows: Vec<SellerRow> = sqlx::query_as(&sql).fetch_all(pool).await?;
    Ok(rows.into_iter().map(Seller::from).collect())
}

/// Create a seller.
///
/// # Errors
///
/// Returns `RepositoryError::Conflict` if the slug is taken.
pub async fn create(
    pool: &PgPool,
    name: &str,
    slug: &str,
    description: Option<&str>,
    logo_url: Option<&str>,
) -> Result<Seller, RepositoryError> {
    let sql = format!(
        "INSERT INTO sellers (name, slug, description, logo_url)
         VALUES ($1, $2, $3, $4)
         RETURNING {SELLER_COLUMNS}"
    );
    let row: SellerRow = sqlx::query_as(&sql)
        .bind(name)
        .bind(slug)
        .bind(description)
        .bind(logo_url)
        .fetch_one(pool)
        .await
        .map_err(slug_conflict)?;

    Ok(Seller::from(row))
}

/// Update a seller's profile.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` for an unknown id and
/// `RepositoryError::Conflict` if the slug is taken.
pub async fn update(
    pool: &PgPool,
    id: SellerId,
    name: &str,
    slug: &str,
    description: Option<&str>,
    logo_url: Option<&str>,
) -> Result<Seller, RepositoryError> {
    let sql = format!(
        "UPDATE sellers
         SET name = $2, slug = $3, description = $4, logo_url = $5
         WHERE id = $1
         RETURNING {SELLER_COLUMNS}"
    );
    let row: Option<SellerRow> = sqlx::query_as(&sql)
        .bind(id)
        .bind(name)
        .bind(slug)
        .bind(description)
        .bind(logo_url)
        .fetch_optional(pool)
        .await
        .map_err(slug_conflict)?;

    row.map(Seller::from).ok_or(RepositoryError::NotFound)
}

/// Deactivate a seller. Their products stay in place but the profile stops
/// being served. Returns `true` if something changed.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the update fails.
pub async fn deactivate(pool: &PgPool, id: SellerId) -> Result<bool, RepositoryError> {
    let result = sqlx::query("UPDATE sellers SET active = FALSE WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

fn slug_conflict(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict("slug already exists".to_owned());
    }
    RepositoryError::Database(e)
}
