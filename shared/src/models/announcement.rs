//! Announcement Model

use serde::{Deserialize, Serialize};

/// Store-wide announcement (공지사항)
///
/// Visible to customers only while `is_active` and not expired; pinned
/// announcements sort ahead of the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Announcement {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub is_active: bool,
    pub is_pinned: bool,
    pub created_at: i64,
    pub expires_at: Option<i64>,
}

/// Create announcement payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnouncementCreate {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub is_pinned: bool,
    pub expires_at: Option<i64>,
}

/// Update announcement payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnouncementUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_active: Option<bool>,
    pub is_pinned: Option<bool>,
    pub expires_at: Option<i64>,
}
