//! Cart types.
//!
//! Carts are keyed by an opaque UUID token minted on first use; there is no
//! account requirement to shop. Each line stores the buyer's option
//! selections as a snapshot - unit prices are resolved against the current
//! product on every read, so price edits show up on the next cart view.

use serde::Serialize;
use talad_core::{CartItemId, ProductId, SelectedOptions};
use uuid::Uuid;

/// One cart line with its price resolved at read time.
#[derive(Debug, Clone, Serialize)]
pub struct CartItem {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub product_name: String,
    pub image: Option<String>,
    pub quantity: i32,
    pub selected_options: SelectedOptions,
    /// Resolved unit price in whole baht (options + discount applied).
    pub unit_price: i64,
    pub line_total: i64,
}

/// A full cart view.
#[derive(Debug, Clone, Serialize)]
pub struct Cart {
    pub token: Uuid,
    pub items: Vec<CartItem>,
    pub subtotal: i64,
}
