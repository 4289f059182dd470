//! Category and seller types.

use serde::Serialize;
use talad_core::{CategoryId, SellerId};

/// A browseable product category.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
}

/// A seller's public profile.
#[derive(Debug, Clone, Serialize)]
pub struct Seller {
    pub id: SellerId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
}
