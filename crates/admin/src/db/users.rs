//! Customer record reads for the back-office.

use sqlx::PgPool;

use talad_core::UserId;

use super::RepositoryError;
use crate::models::user::User;

#[derive(sqlx::FromRow)]
struct UserRow {
    id: UserId,
    name: String,
    email: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            created_at: row.created_at,
        }
    }
}

/// List customers, newest first, optionally filtered by name/email
/// substring.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if a query fails.
pub async fn list(
    pool: &PgPool,
    search: Option<&str>,
    page: u32,
    per_page: u32,
) -> Result<(Vec<User>, i64), RepositoryError> {
    let per_page = i64::from(per_page.clamp(1, 100));
    let offset = i64::from(page.max(1) - 1) * per_page;

    let rows: Vec<UserRow> = sqlx::query_as(
        "SELECT id, name, email, created_at
         FROM users
         WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%' OR email ILIKE '%' || $1 || '%')
         ORDER BY created_at DESC, id DESC
         LIMIT $2 OFFSET $3",
    )
    .bind(search)
    .bind(per_page)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*)
         FROM users
         WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%' OR email ILIKE '%' || $1 || '%')",
    )
    .bind(search)
    .fetch_one(pool)
    .await?;

    Ok((rows.into_iter().map(User::from).collect(), total))
}

/// Get one customer record.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn get(pool: &PgPool, id: UserId) -> Result<Option<User>, RepositoryError> {
    let row: Option<UserRow> = sqlx::query_as(
        "SELECT id, name, email, created_at
         FROM users
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(User::from))
}
