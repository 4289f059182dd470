//! Banner management.

use sqlx::PgPool;

use talad_core::BannerId;

use super::RepositoryError;
use crate::models::content::Banner;

#[derive(sqlx::FromRow)]
struct BannerRow {
    id: BannerId,
    title: String,
    image_url: String,
    link_url: Option<String>,
    position: i32,
    active: bool,
}

impl From<BannerRow> for Banner {
    fn from(row: BannerRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            image_url: row.image_url,
            link_url: row.link_url,
            position: row.position,
            active: row.active,
        }
    }
}

/// All banners in display order, active or not.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn list(pool: &PgPool) -> Result<Vec<Banner>, RepositoryError> {
    let rows: Vec<BannerRow> = sqlx::query_as(
        "SELECT id, title, image_url, link_url, position, active
         FROM banners
         ORDER BY position, id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Banner::from).collect())
}

/// Create a banner.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the insert fails.
pub async fn create(
    pool: &PgPool,
    title: &str,
    image_url: &str,
    link_url: Option<&str>,
    position: i32,
    active: bool,
) -> Result<Banner, RepositoryError> {
    let row: BannerRow = sqlx::query_as(
        "INSERT INTO banners (title, image_url, link_url, position, active)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id, title, image_url, link_url, position, active",
    )
    .bind(title)
    .bind(image_url)
    .bind(link_url)
    .bind(position)
    .bind(active)
    .fetch_one(pool)
    .await?;

    Ok(Banner::from(row))
}

/// Update a banner.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` for an unknown id.
pub async fn update(
    pool: &PgPool,
    id: BannerId,
    title: &str,
    image_url: &str,
    link_url: Option<&str>,
    position: i32,
    active: bool,
) -> Result<Banner, RepositoryError> {
    let row: Option<BannerRow> = sqlx::query_as(
        "UPDATE banners
         SET title = $2, image_url = $3, link_url = $4, position = $5, active = $6
         WHERE id = $1
         RETURNING id, title, image_url, link_url, position, active",
    )
    .bind(id)
    .bind(title)
    .bind(image_url)
    .bind(link_url)
    .bind(position)
    .bind(active)
    .fetch_optional(pool)
    .await?;

    row.map(Banner::from).ok_or(RepositoryError::NotFound)
}

/// Delete a banner. Returns `true` if something was deleted.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the delete fails.
pub async fn delete(pool: &PgPool, id: BannerId) -> Result<bool, RepositoryError> {
    let result = sqlx::query("DELETE FROM banners WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
