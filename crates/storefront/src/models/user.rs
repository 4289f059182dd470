//! Customer record types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use talad_core::UserId;

/// A customer record. No credentials - identity mechanics live outside
/// this system.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
