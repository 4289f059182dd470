//! Customer record types.
//!
//! Customers are plain records (name + contact email); credential storage
//! and session handling are outside this system.

use chrono::{DateTime, Utc};
use serde::Serialize;
use talad_core::UserId;

/// A customer record.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
