//! Product types served to buyers.

use chrono::{DateTime, Utc};
use serde::Serialize;
use talad_core::{CategoryId, ProductId, ProductOption, SellerId};

/// Full product detail, including the canonical option tree in its
/// persisted order.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub seller_id: SellerId,
    pub category_id: Option<CategoryId>,
    pub name: String,
    pub description: Option<String>,
    /// Base price in whole baht, before option adjustments and discount.
    pub price: i64,
    /// Percentage discount applied after option resolution (0-100).
    pub discount_percent: i64,
    /// Base price with the discount applied - what listings display.
    pub display_price: i64,
    pub image: Option<String>,
    pub images: Vec<String>,
    pub options: Vec<ProductOption>,
    pub rating: f64,
    pub reviews: i64,
    pub sold: i64,
    pub stock: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Compact product card for listings, search results, and wishlists.
#[derive(Debug, Clone, Serialize)]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
    pub price: i64,
    pub discount_percent: i64,
    pub display_price: i64,
    pub image: Option<String>,
    pub rating: f64,
    pub sold: i64,
}
