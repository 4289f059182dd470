//! Category reads.

use sqlx::PgPool;

use talad_core::CategoryId;

use super::RepositoryError;
use crate::models::catalog::Category;

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: CategoryId,
    name: String,
    slug: String,
}

/// All categories in display order.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn list_categories(pool: &PgPool) -> Result<Vec<Category>, RepositoryError> {
    let rows: Vec<CategoryRow> = sqlx::query_as(
        "SELECT id, name, slug
         FROM categories
         ORDER BY position, name",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| Category {
            id: row.id,
            name: row.name,
            slug: row.slug,
        })
        .collect())
}
