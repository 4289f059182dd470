//! HTTP route handlers for the admin API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Liveness check
//! GET  /health/ready                    - Readiness check (pings DB)
//!
//! # Products
//! GET    /api/products                  - Listing (any status, search, paginate)
//! POST   /api/products                  - Create (runs the option pipeline)
//! GET    /api/products/{id}             - Detail with option tree
//! PUT    /api/products/{id}             - Update (replaces the option tree)
//! DELETE /api/products/{id}             - Archive
//!
//! # Catalog structure
//! GET/POST       /api/categories        - List / create
//! PUT/DELETE     /api/categories/{id}   - Update / delete
//! GET/POST       /api/sellers           - List / create
//! PUT/DELETE     /api/sellers/{id}      - Update / deactivate
//!
//! # Content
//! GET/POST       /api/banners           - List / create
//! PUT/DELETE     /api/banners/{id}      - Update / delete
//! GET/POST       /api/announcements     - List / create
//! PUT/DELETE     /api/announcements/{id} - Update / delete
//!
//! # Orders
//! GET   /api/orders                     - Listing (filter by status)
//! GET   /api/orders/{id}                - Detail
//! PATCH /api/orders/{id}/status         - Move through the lifecycle
//! GET   /api/orders/{id}/chat           - Chat messages
//! POST  /api/orders/{id}/chat           - Staff reply
//!
//! # Customers
//! GET /api/users                        - Listing (search, paginate)
//! GET /api/users/{id}                   - Detail
//! ```

pub mod announcements;
pub mod banners;
pub mod categories;
pub mod orders;
pub mod products;
pub mod sellers;
pub mod users;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route(
            "/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::archive),
        )
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{id}", get(orders::show))
        .route("/{id}/status", patch(orders::update_status))
        .route("/{id}/chat", get(orders::chat_index).post(orders::chat_post))
}

/// Create all routes for the admin API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/products", product_routes())
        .route(
            "/api/categories",
            get(categories::index).post(categories::create),
        )
        .route(
            "/api/categories/{id}",
            axum::routing::put(categories::update).delete(categories::delete),
        )
        .route("/api/sellers", get(sellers::index).post(sellers::create))
        .route(
            "/api/sellers/{id}",
            axum::routing::put(sellers::update).delete(sellers::deactivate),
        )
        .route("/api/banners", get(banners::index).post(banners::create))
        .route(
            "/api/banners/{id}",
            axum::routing::put(banners::update).delete(banners::delete),
        )
        .route(
            "/api/announcements",
            get(announcements::index).post(announcements::create),
        )
        .route(
            "/api/announcements/{id}",
            axum::routing::put(announcements::update).delete(announcements::delete),
        )
        .nest("/api/orders", order_routes())
        .route("/api/users", get(users::index))
        .route("/api/users/{id}", get(users::show))
}
