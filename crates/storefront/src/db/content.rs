//! Home page content reads (banners and announcements).

use sqlx::PgPool;

use talad_core::{AnnouncementId, BannerId};

use super::RepositoryError;
use crate::models::content::{Announcement, Banner};

#[derive(sqlx::FromRow)]
struct BannerRow {
    id: BannerId,
    title: String,
    image_url: String,
    link_url: Option<String>,
}

#[derive(sqlx::FromRow)]
struct AnnouncementRow {
    id: AnnouncementId,
    title: String,
    body: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

/// Active banners in display order.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn active_banners(pool: &PgPool) -> Result<Vec<Banner>, RepositoryError> {
    let rows: Vec<BannerRow> = sqlx::query_as(
        "SELECT id, title, image_url, link_url
         FROM banners
         WHERE active
         ORDER BY position, id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| Banner {
            id: row.id,
            title: row.title,
            image_url: row.image_url,
            link_url: row.link_url,
        })
        .collect())
}

/// Active announcements, newest first.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn active_announcements(pool: &PgPool) -> Result<Vec<Announcement>, RepositoryError> {
    let rows: Vec<AnnouncementRow> = sqlx::query_as(
        "SELECT id, title, body, created_at
         FROM announcements
         WHERE active
         ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| Announcement {
            id: row.id,
            title: row.title,
            body: row.body,
            created_at: row.created_at,
        })
        .collect())
}
