//! Banner and announcement types as managed by the back-office.

use chrono::{DateTime, Utc};
use serde::Serialize;
use talad_core::{AnnouncementId, BannerId};

/// A promotional banner. Inactive banners stay editable but are not served
/// to the storefront.
#[derive(Debug, Clone, Serialize)]
pub struct Banner {
    pub id: BannerId,
    pub title: String,
    pub image_url: String,
    pub link_url: Option<String>,
    pub position: i32,
    pub active: bool,
}

/// A site-wide announcement.
#[derive(Debug, Clone, Serialize)]
pub struct Announcement {
    pub id: AnnouncementId,
    pub title: String,
    pub body: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}
