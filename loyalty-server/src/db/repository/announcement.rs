//! Announcement Repository

use shared::models::{Announcement, AnnouncementCreate, AnnouncementUpdate};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

const ANNOUNCEMENT_SELECT: &str =
    "SELECT id, title, content, is_active, is_pinned, created_at, expires_at FROM announcement";

/// Admin listing: everything, pinned first then newest
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Announcement>> {
    let sql = format!("{ANNOUNCEMENT_SELECT} ORDER BY is_pinned DESC, created_at DESC");
    let rows = sqlx::query_as::<_, Announcement>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Customer listing: active and unexpired only, pinned first then newest
pub async fn find_active(pool: &SqlitePool, now: i64) -> RepoResult<Vec<Announcement>> {
    let sql = format!(
        "{ANNOUNCEMENT_SELECT} WHERE is_active = 1 AND (expires_at IS NULL OR expires_at > ?) ORDER BY is_pinned DESC, created_at DESC"
    );
    let rows = sqlx::query_as::<_, Announcement>(&sql)
        .bind(now)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Announcement>> {
    let sql = format!("{ANNOUNCEMENT_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Announcement>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: AnnouncementCreate) -> RepoResult<Announcement> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO announcement (id, title, content, is_active, is_pinned, created_at, expires_at) VALUES (?1, ?2, ?3, 1, ?4, ?5, ?6)",
    )
    .bind(id)
    .bind(&data.title)
    .bind(&data.content)
    .bind(data.is_pinned)
    .bind(now)
    .bind(data.expires_at)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create announcement".into()))
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: AnnouncementUpdate,
) -> RepoResult<Announcement> {
    let rows = sqlx::query(
        "UPDATE announcement SET title = COALESCE(?1, title), content = COALESCE(?2, content), is_active = COALESCE(?3, is_active), is_pinned = COALESCE(?4, is_pinned), expires_at = COALESCE(?5, expires_at) WHERE id = ?6",
    )
    .bind(&data.title)
    .bind(&data.content)
    .bind(data.is_active)
    .bind(data.is_pinned)
    .bind(data.expires_at)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Announcement {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Announcement {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM announcement WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
