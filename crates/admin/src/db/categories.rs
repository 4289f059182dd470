//! Category management.

use sqlx::PgPool;

use talad_core::CategoryId;

use super::RepositoryError;
use crate::models::catalog::Category;

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: CategoryId,
    name: String,
    slug: String,
    position: i32,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            slug: row.slug,
            position: row.position,
        }
    }
}

/// All categories in display order.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn list(pool: &PgPool) -> Result<Vec<Category>, RepositoryError> {
    let rows: Vec<CategoryRow> = sqlx::query_as(
        "SELECT id, name, slug, position
         FROM categories
         ORDER BY position, name",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Category::from).collect())
}

/// Create a category.
///
/// # Errors
///
/// Returns `RepositoryError::Conflict` if the slug is taken.
pub async fn create(
    pool: &PgPool,
    name: &str,
    slug: &str,
    position: i32,
) -> Result<Category, RepositoryError> {
    let row: CategoryRow = sqlx::query_as(
        "INSERT INTO categories (name, slug, position)
         VALUES ($1, $2, $3)
         RETURNING id, name, slug, position",
    )
    .bind(name)
    .bind(slug)
    .bind(position)
    .fetch_one(pool)
    .await
    .map_err(slug_conflict)?;

    Ok(Category::from(row))
}

/// Update a category.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` for an unknown id and
/// `RepositoryError::Conflict` if the slug is taken.
pub async fn update(
    pool: &PgPool,
    id: CategoryId,
    name: &str,
    slug: &str,
    position: i32,
) -> Result<Category, RepositoryError> {
    let row: Option<CategoryRow> = sqlx::query_as(
        "UPDATE categories
         SET name = $2, slug = $3, position = $4
         WHERE id = $1
         RETURNING id, name, slug, position",
    )
    .bind(id)
    .bind(name)
    .bind(slug)
    .bind(position)
    .fetch_optional(pool)
    .await
    .map_err(slug_conflict)?;

    row.map(Category::from).ok_or(RepositoryError::NotFound)
}

/// Delete a category. Products referencing it fall back to "no category"
/// (the FK is `ON DELETE SET NULL`). Returns `true` if something was
/// deleted.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the delete fails.
pub async fn delete(pool: &PgPool, id: CategoryId) -> Result<bool, RepositoryError> {
    let result = sqlx::query("DELETE FROM categories WHERE id = $1")
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
