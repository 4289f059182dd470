//! Home page route handler.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;

use crate::db::{self, ProductFilter, ProductRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::models::content::{Announcement, Banner};
use crate::models::product::ProductSummary;
use crate::state::{AppState, HomeContent};

/// How many latest products the home payload carries.
const LATEST_PRODUCT_COUNT: u32 = 8;

/// Home page payload.
#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub banners: Vec<Banner>,
    pub announcements: Vec<Announcement>,
    pub latest_products: Vec<ProductSummary>,
}

/// Serve the home page content.
///
/// Banners and announcements come from a short-TTL cache; the latest
/// product strip is read fresh so new listings show up immediately.
pub async fn home(State(state): State<AppState>) -> Result<Json<HomeResponse>> {
    let content = state
        .content_cache()
        .try_get_with("home", async {
            let banners = db::content::active_banners(state.pool()).await?;
            let announcements = db::content::active_announcements(state.pool()).await?;
            Ok::<_, RepositoryError>(Arc::new(HomeContent {
                banners,
                announcements,
            }))
        })
        .await
        .map_err(|e: Arc<RepositoryError>| AppError::Internal(e.to_string()))?;

    let filter = ProductFilter {
        per_page: LATEST_PRODUCT_COUNT,
        page: 1,
        ..ProductFilter::default()
    };
    let (latest_products, _) = ProductRepository::new(state.pool()).list(&filter).await?;

    Ok(Json(HomeResponse {
        banners: content.banners.clone(),
        announcements: content.announcements.clone(),
        latest_products,
    }))
}
