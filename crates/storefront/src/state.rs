//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;

use crate::config::StorefrontConfig;
use crate::models::content::{Announcement, Banner};

/// How long home page content (banners, announcements) may be served from
/// cache before being re-read from the database.
const CONTENT_CACHE_TTL: Duration = Duration::from_secs(60);

/// Cached home page content.
#[derive(Debug, Clone)]
pub struct HomeContent {
    pub banners: Vec<Banner>,
    pub announcements: Vec<Announcement>,
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    content_cache: Cache<&'static str, Arc<HomeContent>>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig, pool: PgPool) -> Self {
        let content_cache = Cache::builder()
            .max_capacity(8)
            .time_to_live(CONTENT_CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                content_cache,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the home content cache.
    #[must_use]
    pub fn content_cache(&self) -> &Cache<&'static str, Arc<HomeContent>> {
        &self.inner.content_cache
    }
}
