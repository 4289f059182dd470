//! Announcement management.

use sqlx::PgPool;

use talad_core::AnnouncementId;

use super::RepositoryError;
use crate::models::content::Announcement;

#[derive(sqlx::FromRow)]
struct AnnouncementRow {
    id: AnnouncementId,
    title: String,
    body: String,
    active: bool,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<AnnouncementRow> for Announcement {
    fn from(row: AnnouncementRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            body: row.body,
            active: row.active,
            created_at: row.created_at,
        }
    }
}

/// All announcements, newest first, active or not.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn list(pool: &PgPool) -> Result<Vec<Announcement>, RepositoryError> {
    let rows: Vec<AnnouncementRow> = sqlx::query_as(
        "SELECT id, title, body, active, created_at
         FROM announcements
         ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Announcement::from).collect())
}

/// Create an announcement.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the insert fails.
pub async fn create(
    pool: &PgPool,
    title: &str,
    body: &str,
    active: bool,
) -> Result<Announcement, RepositoryError> {
    let row: AnnouncementRow = sqlx::query_as(
        "INSERT INTO announcements (title, body, active)
         VALUES ($1, $2, $3)
         RETURNING id, title, body, active, created_at",
    )
    .bind(title)
    .bind(body)
    .bind(active)
    .fetch_one(pool)
    .await?;

    Ok(Announcement::from(row))
}

/// Update an announcement.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` for an unknown id.
pub async fn update(
    pool: &PgPool,
    id: AnnouncementId,
    title: &str,
    body: &str,
    active: bool,
) -> Result<Announcement, RepositoryError> {
    let row: Option<AnnouncementRow> = sqlx::query_as(
        "UPDATE announcements
         SET title = $2, body = $3, active = $4
         WHERE id = $1
         RETURNING id, title, body, active, created_at",
    )
    .bind(id)
    .bind(title)
    .bind(body)
    .bind(active)
    .fetch_optional(pool)
    .await?;

    row.map(Announcement::from).ok_or(RepositoryError::NotFound)
}

/// Delete an announcement. Returns `true` if something was deleted.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the delete fails.
pub async fn delete(pool: &PgPool, id: AnnouncementId) -> Result<bool, RepositoryError> {
    let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
