//! Product types as managed by the back-office.

use chrono::{DateTime, Utc};
use serde::Serialize;
use talad_core::{CategoryId, ProductId, ProductOption, ProductStatus, SellerId};

/// Full product as the admin sees it - any status, full option tree.
#[derive(Debug, Clone, Serialize)]
pub struct AdminProduct {
    pub id: ProductId,
    pub seller_id: SellerId,
    pub category_id: Option<CategoryId>,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub discount_percent: i64,
    pub image: Option<String>,
    pub images: Vec<String>,
    pub options: Vec<ProductOption>,
    pub rating: f64,
    pub reviews: i64,
    pub sold: i64,
    pub stock: i64,
    pub status: ProductStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Compact product row for the admin listing.
#[derive(Debug, Clone, Serialize)]
pub struct AdminProductSummary {
    pub id: ProductId,
    pub name: String,
    pub price: i64,
    pub discount_percent: i64,
    pub stock: i64,
    pub sold: i64,
    pub status: ProductStatus,
    pub updated_at: DateTime<Utc>,
}

/// A validated product submission, ready to persist.
///
/// `options` is the canonical list produced by the normalize → dedupe →
/// validate pipeline; persistence replaces the stored tree with it
/// wholesale.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub seller_id: SellerId,
    pub category_id: Option<CategoryId>,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub discount_percent: i64,
    pub image: Option<String>,
    pub images: Vec<String>,
    pub options: Vec<ProductOption>,
    pub stock: i64,
    pub status: ProductStatus,
}
