//! Database operations for the storefront.
//!
//! The storefront and admin binaries share one `PostgreSQL` database; this
//! side is read-mostly (catalog, content) plus the buyer-owned tables
//! (carts, orders, chat, wishlist). Queries are runtime-bound with explicit
//! row structs, so the workspace builds without a live database.
//!
//! # Migrations
//!
//! Migrations live in `crates/admin/migrations/` (the admin owns the
//! schema) and run via:
//! ```bash
//! cargo run -p talad-cli -- migrate
//! ```

pub mod cart;
pub mod categories;
pub mod chat;
pub mod content;
pub mod orders;
pub mod products;
pub mod sellers;
pub mod users;
pub mod wishlist;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use cart::CartRepository;
pub use chat::ChatRepository;
pub use orders::OrderRepository;
pub use products::{ProductFilter, ProductRepository, ProductSort};
pub use wishlist::WishlistRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., empty cart at checkout).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
