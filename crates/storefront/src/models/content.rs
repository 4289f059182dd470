//! Home page content types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use talad_core::{AnnouncementId, BannerId};

/// A promotional banner shown on the home page, in `position` order.
#[derive(Debug, Clone, Serialize)]
pub struct Banner {
    pub id: BannerId,
    pub title: String,
    pub image_url: String,
    pub link_url: Option<String>,
}

/// A site-wide announcement.
#[derive(Debug, Clone, Serialize)]
pub struct Announcement {
    pub id: AnnouncementId,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}
