//! Admin Notification Model

use serde::{Deserialize, Serialize};

/// What produced an admin alert; paired with `source_id` to reference the
/// originating entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum AdminNotificationSource {
    Signup,
    Inquiry,
    Withdrawal,
}

/// Fan-out alert shown on the admin dashboard (관리자 알림).
///
/// Read state is independent of the customer-facing notification rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct AdminNotification {
    pub id: i64,
    pub source_type: AdminNotificationSource,
    pub source_id: i64,
    pub title: String,
    pub content: String,
    pub is_read: bool,
    pub created_at: i64,
}
