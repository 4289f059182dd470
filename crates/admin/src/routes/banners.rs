//! Banner management route handlers.
//!
//! Banners reference images by URL; upload and serving of the image bytes
//! is outside this system.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use talad_core::BannerId;

use crate::db;
use crate::error::{AppError, Result};
use crate::models::content::Banner;
use crate::state::AppState;

/// Banner submission.
#[derive(Debug, Deserialize)]
pub struct BannerPayload {
    pub title: String,
    pub image_url: String,
    pub link_url: Option<String>,
    #[serde(default)]
    pub position: i32,
    #[serde(default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

impl BannerPayload {
    fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::Validation("title must not be blank".to_owned()));
        }
        if self.image_url.trim().is_empty() {
            return Err(AppError::Validation(
                "imageUrl must not be blank".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Banner list in display order.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Banner>>> {
    Ok(Json(db::banners::list(state.pool()).await?))
}

/// Create a banner.
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<BannerPayload>,
) -> Result<(StatusCode, Json<Banner>)> {
    payload.validate()?;
    let banner = db::banners::create(
        state.pool(),
        payload.title.trim(),
        payload.image_url.trim(),
        payload.link_url.as_deref(),
        payload.position,
        payload.active,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(banner)))
}

/// Update a banner.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<BannerId>,
    Json(payload): Json<BannerPayload>,
) -> Result<Json<Banner>> {
    payload.validate()?;
    let banner = db::banners::update(
        state.pool(),
        id,
        payload.title.trim(),
        payload.image_url.trim(),
        payload.link_url.as_deref(),
        payload.position,
        payload.active,
    )
    .await?;
    Ok(Json(banner))
}

/// Delete a banner.
pub async fn delete(State(state): State<AppState>, Path(id): Path<BannerId>) -> Result<StatusCode> {
    if db::banners::delete(state.pool(), id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("banner {id} not found")))
    }
}
