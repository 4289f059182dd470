//! Announcement management route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use talad_core::AnnouncementId;

use crate::db;
use crate::error::{AppError, Result};
use crate::models::content::Announcement;
use crate::state::AppState;

/// Announcement submission.
#[derive(Debug, Deserialize)]
pub struct AnnouncementPayload {
    pub title: String,
    pub body: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

impl AnnouncementPayload {
    fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::Validation("title must not be blank".to_owned()));
        }
        if self.body.trim().is_empty() {
            return Err(AppError::Validation("body must not be blank".to_owned()));
        }
        Ok(())
    }
}

/// Announcement list, newest first.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Announcement>>> {
    Ok(Json(db::announcements::list(state.pool()).await?))
}

/// Create an announcement.
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<AnnouncementPayload>,
) -> Result<(StatusCode, Json<Announcement>)> {
    payload.validate()?;
    let announcement = db::announcements::create(
        state.pool(),
        payload.title.trim(),
        payload.body.trim(),
        payload.active,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(announcement)))
}

/// Update an announcement.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<AnnouncementId>,
    Json(payload): Json<AnnouncementPayload>,
) -> Result<Json<Announcement>> {
    payload.validate()?;
    let announcement = db::announcements::update(
        state.pool(),
        id,
        payload.title.trim(),
        payload.body.trim(),
        payload.active,
    )
    .await?;
    Ok(Json(announcement))
}

/// Delete an announcement.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<AnnouncementId>,
) -> Result<StatusCode> {
    if db::announcements::delete(state.pool(), id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("announcement {id} not found")))
    }
}
