//! Notification Repository

use shared::models::{Notification, NotificationType};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

const NOTIFICATION_SELECT: &str =
    "SELECT id, customer_id, title, content, type, is_read, created_at FROM notification";

pub async fn create(
    pool: &SqlitePool,
    customer_id: i64,
    title: &str,
    content: &str,
    notification_type: NotificationType,
) -> RepoResult<Notification> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO notification (id, customer_id, title, content, type, is_read, created_at) VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6)",
    )
    .bind(id)
    .bind(customer_id)
    .bind(title)
    .bind(content)
    .bind(notification_type)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create notification".into()))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Notification>> {
    let sql = format!("{NOTIFICATION_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Notification>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_customer(pool: &SqlitePool, customer_id: i64) -> RepoResult<Vec<Notification>> {
    let sql = format!("{NOTIFICATION_SELECT} WHERE customer_id = ? ORDER BY created_at DESC, id DESC");
    let rows = sqlx::query_as::<_, Notification>(&sql)
        .bind(customer_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn mark_read(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("UPDATE notification SET is_read = 1 WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Flip every unread personal notification of a customer. Announcement
/// mirrors keep their own read state and are excluded.
pub async fn mark_all_read(pool: &SqlitePool, customer_id: i64) -> RepoResult<u64> {
    let rows = sqlx::query(
        "UPDATE notification SET is_read = 1 WHERE customer_id = ? AND is_read = 0 AND type != 'announcement'",
    )
    .bind(customer_id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected())
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM notification WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
