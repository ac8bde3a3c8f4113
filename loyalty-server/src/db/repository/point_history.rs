//! Point Ledger Repository
//!
//! Append-only: entries are inserted once and never updated. The only
//! destructive operation is the administrative delete, whose balance
//! side-effect is handled by the service layer.

use shared::models::{PointEntryType, PointHistory};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

const ENTRY_SELECT: &str =
    "SELECT id, customer_id, points, type, reason, created_at FROM point_history";

pub async fn create(
    pool: &SqlitePool,
    customer_id: i64,
    points: i64,
    entry_type: PointEntryType,
    reason: Option<&str>,
) -> RepoResult<PointHistory> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO point_history (id, customer_id, points, type, reason, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(id)
    .bind(customer_id)
    .bind(points)
    .bind(entry_type)
    .bind(reason)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create ledger entry".into()))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<PointHistory>> {
    let sql = format!("{ENTRY_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, PointHistory>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_customer(pool: &SqlitePool, customer_id: i64) -> RepoResult<Vec<PointHistory>> {
    let sql = format!("{ENTRY_SELECT} WHERE customer_id = ? ORDER BY created_at DESC, id DESC");
    let rows = sqlx::query_as::<_, PointHistory>(&sql)
        .bind(customer_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM point_history WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
