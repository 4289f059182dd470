//! Customer record repository.
//!
//! Customers are plain records (display name + contact email). Credential
//! storage and session handling are outside this system; order history and
//! wishlists hang off the record's id.

use sqlx::PgPool;

use talad_core::{Email, UserId};

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

/// Create a customer record.
///
/// # Errors
///
/// Returns `RepositoryError::Conflict` if the email is already registered.
pub async fn create(pool: &PgPool, name: &str, email: &Email) -> Result<User, RepositoryError> {
    let row: UserRow = sqlx::query_as(
        "INSERT INTO users (name, email)
         VALUES ($1, $2)
         RETURNING id, name, email, created_at",
    )
    .bind(name)
    .bind(email.as_str())
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_unique_violation()
        {
            return RepositoryError::Conflict("email already registered".to_owned());
        }
        RepositoryError::Database(e)
    })?;

    Ok(User::from(row))
}

/// Get a customer record by id.
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
