//! Admin Notification Repository

use shared::models::{AdminNotification, AdminNotificationSource};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

const ALERT_SELECT: &str =
    "SELECT id, source_type, source_id, title, content, is_read, created_at FROM admin_notification";

pub async fn create(
    pool: &SqlitePool,
    source_type: AdminNotificationSource,
    source_id: i64,
    title: &str,
    content: &str,
) -> RepoResult<AdminNotification> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO admin_notification (id, source_type, source_id, title, content, is_read, created_at) VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6)",
    )
    .bind(id)
    .bind(source_type)
    .bind(source_id)
    .bind(title)
    .bind(content)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create admin notification".into()))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<AdminNotification>> {
    let sql = format!("{ALERT_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, AdminNotification>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<AdminNotification>> {
    let sql = format!("{ALERT_SELECT} ORDER BY created_at DESC, id DESC");
    let rows = sqlx::query_as::<_, AdminNotification>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn mark_read(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("UPDATE admin_notification SET is_read = 1 WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing;

    #[tokio::test]
    async fn test_create_mark_read() {
        let pool = testing::pool().await;
        let alert = create(
            &pool,
            AdminNotificationSource::Signup,
            42,
            "신규 가입 신청",
            "김철수님이 가입을 신청했습니다.",
        )
        .await
        .unwrap();
        assert!(!alert.is_read);
        assert_eq!(alert.source_type, AdminNotificationSource::Signup);
        assert_eq!(alert.source_id, 42);

        assert!(mark_read(&pool, alert.id).await.unwrap());
        let read = find_by_id(&pool, alert.id).await.unwrap().unwrap();
        assert!(read.is_read);
    }
}
