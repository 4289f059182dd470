//! API-facing domain types for the admin.
//!
//! These are the JSON response shapes, separate from the database row types
//! that live beside the queries in [`crate::db`].

pub mod catalog;
pub mod content;
pub mod order;
pub mod product;
pub mod user;

pub use catalog::{Category, Seller};
pub use content::{Announcement, Banner};
pub use order::{ChatMessage, Order, OrderItem};
pub use product::{AdminProduct, AdminProductSummary, NewProduct};
pub use user::User;
