//! Notification Dispatcher
//!
//! Creates customer notifications and admin fan-out alerts, and owns the
//! read-state flips. Broadcast is a partial-failure-tolerant bulk send:
//! callers compare `success_count` against `requested`.

use sqlx::SqlitePool;

use shared::models::{
    AdminNotification, AdminNotificationSource, Notification, NotificationType,
};

use crate::db::repository::{admin_notification, customer, notification};
use crate::utils::validation::{MAX_NOTE_LEN, MAX_TITLE_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

/// Create a single notification row for a customer.
pub async fn notify(
    pool: &SqlitePool,
    customer_id: i64,
    title: &str,
    content: &str,
    notification_type: NotificationType,
) -> AppResult<Notification> {
    customer::find_by_id(pool, customer_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Customer {customer_id}")))?;
    Ok(notification::create(pool, customer_id, title, content, notification_type).await?)
}

/// Result of a broadcast: notifications actually created plus the success
/// count, which may be below `requested` when targets fail to resolve.
#[derive(Debug, serde::Serialize)]
pub struct BroadcastOutcome {
    pub notifications: Vec<Notification>,
    pub success_count: usize,
    pub requested: usize,
}

/// Send an admin message to the given customers, or to every ACTIVE
/// customer when no explicit target list is passed.
pub async fn broadcast(
    pool: &SqlitePool,
    customer_ids: Option<&[i64]>,
    title: &str,
    content: &str,
) -> AppResult<BroadcastOutcome> {
    validate_required_text(title, "title", MAX_TITLE_LEN)?;
    validate_required_text(content, "content", MAX_NOTE_LEN)?;

    let targets: Vec<i64> = match customer_ids {
        Some(ids) => ids.to_vec(),
        None => customer::find_by_status(pool, shared::models::CustomerStatus::Active)
            .await?
            .into_iter()
            .map(|c| c.id)
            .collect(),
    };

    let mut notifications = Vec::new();
    for &id in &targets {
        match notify(pool, id, title, content, NotificationType::Message).await {
            Ok(n) => notifications.push(n),
            Err(e) => {
                tracing::warn!(customer_id = id, error = %e, "Broadcast send skipped");
            }
        }
    }

    let success_count = notifications.len();
    tracing::info!(success = success_count, requested = targets.len(), "Broadcast sent");
    Ok(BroadcastOutcome {
        notifications,
        success_count,
        requested: targets.len(),
    })
}

/// Flip one notification to read.
pub async fn mark_read(pool: &SqlitePool, id: i64) -> AppResult<()> {
    if !notification::mark_read(pool, id).await? {
        return Err(AppError::not_found(format!("Notification {id}")));
    }
    Ok(())
}

/// Flip all of a customer's unread personal notifications; returns how
/// many were flipped.
pub async fn mark_all_read(pool: &SqlitePool, customer_id: i64) -> AppResult<u64> {
    Ok(notification::mark_all_read(pool, customer_id).await?)
}

/// Delete a notification (customer long-press delete).
pub async fn delete(pool: &SqlitePool, id: i64) -> AppResult<()> {
    if !notification::delete(pool, id).await? {
        return Err(AppError::not_found(format!("Notification {id}")));
    }
    Ok(())
}

/// Fan out an alert to the admin dashboard. Best-effort from the caller's
/// perspective: the primary action has already been persisted.
pub async fn admin_alert(
    pool: &SqlitePool,
    source_type: AdminNotificationSource,
    source_id: i64,
    title: &str,
    content: &str,
) -> AppResult<AdminNotification> {
    Ok(admin_notification::create(pool, source_type, source_id, title, content).await?)
}
