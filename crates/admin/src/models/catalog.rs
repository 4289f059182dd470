//! Category and seller types as managed by the back-office.

use chrono::{DateTime, Utc};
use serde::Serialize;
use talad_core::{CategoryId, SellerId};

/// A product category.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub position: i32,
}

/// A seller account.
#[derive(Debug, Clone, Serialize)]
pub struct Seller {
    pub id: SellerId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}
