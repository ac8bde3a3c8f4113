//! Notification Model

use serde::{Deserialize, Serialize};

/// Notification kind, persisted as 'system' / 'message' / 'announcement'.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum NotificationType {
    /// Paired with a ledger mutation
    System,
    /// Admin broadcast
    Message,
    /// Announcement mirror (excluded from bulk mark-as-read)
    Announcement,
}

/// Per-customer notification (알림)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Notification {
    pub id: i64,
    pub customer_id: i64,
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    #[cfg_attr(feature = "db", sqlx(rename = "type"))]
    pub notification_type: NotificationType,
    pub is_read: bool,
    pub created_at: i64,
}
