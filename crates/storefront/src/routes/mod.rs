//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                                  - Liveness check
//! GET  /health/ready                            - Readiness check (pings DB)
//!
//! # Home & catalog
//! GET  /api/home                                - Banners, announcements, latest products
//! GET  /api/categories                          - Category list
//! GET  /api/sellers/{slug}                      - Seller profile + products
//! GET  /api/products                            - Product listing (filter/sort/paginate)
//! GET  /api/products/{id}                       - Product detail with option tree
//! POST /api/products/{id}/price                 - Price quote for selected options
//!
//! # Cart
//! POST   /api/cart                              - Mint a cart token
//! GET    /api/cart/{token}                      - Cart with resolved prices
//! POST   /api/cart/{token}/items                - Add a line
//! PATCH  /api/cart/{token}/items/{item_id}      - Update quantity
//! DELETE /api/cart/{token}/items/{item_id}      - Remove a line
//! POST   /api/cart/{token}/checkout             - Place the order
//!
//! # Orders & chat
//! GET  /api/orders/{id}                         - Order detail
//! GET  /api/orders/{id}/chat                    - Chat messages
//! POST /api/orders/{id}/chat                    - Post a buyer message
//! GET  /api/users/{user_id}/orders              - Order history
//!
//! # Customers
//! POST /api/users                               - Create a customer record
//! GET  /api/users/{user_id}                     - Customer record
//!
//! # Wishlist
//! GET    /api/users/{user_id}/wishlist               - Wishlisted products
//! POST   /api/users/{user_id}/wishlist               - Add a product
//! DELETE /api/users/{user_id}/wishlist/{product_id}  - Remove a product
//! ```

pub mod cart;
pub mod categories;
pub mod home;
pub mod orders;
pub mod products;
pub mod sellers;
pub mod users;
pub mod wishlist;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
        .route("/{id}/price", post(products::quote_price))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(cart::create))
        .route("/{token}", get(cart::show))
        .route("/{token}/items", post(cart::add_item))
        .route(
            "/{token}/items/{item_id}",
            axum::routing::patch(cart::update_item).delete(cart::remove_item),
        )
        .route("/{token}/checkout", post(cart::checkout))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(orders::show))
        .route("/{id}/chat", get(orders::chat_index).post(orders::chat_post))
}

/// Create the per-user routes router (orders, wishlist).
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(orders::index_for_user))
        .route("/wishlist", get(wishlist::index).post(wishlist::add))
        .route("/wishlist/{product_id}", delete(wishlist::remove))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/home", get(home::home))
        .route("/api/categories", get(categories::index))
        .route("/api/sellers/{slug}", get(sellers::show))
        .nest("/api/products", product_routes())
        .nest("/api/cart", cart_routes())
        .nest("/api/orders", order_routes())
        .route("/api/users", post(users::create))
        .route("/api/users/{user_id}", get(users::show))
        .nest("/api/users/{user_id}", user_routes())
}
