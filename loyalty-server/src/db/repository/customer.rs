//! Customer Repository
//!
//! Lifecycle transitions are guarded in SQL (`WHERE status = ...`) so a
//! concurrent admin cannot move a customer through an undefined edge, and
//! balance mutations are single atomic statements so two admins operating
//! on the same customer cannot lose each other's update.

use serde::Serialize;
use shared::models::{Customer, CustomerCreate, CustomerStatus};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

const CUSTOMER_SELECT: &str = "SELECT id, name, phone, phone_normalized, password_hash, company, is_individual, total_points, status, memo, created_at, withdrawn_at FROM customer";

/// Per-status totals for the admin dashboard stat cards
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CustomerCounts {
    pub total: i64,
    pub pending: i64,
    pub active: i64,
    pub withdrawn: i64,
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Customer>> {
    let sql = format!("{CUSTOMER_SELECT} ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, Customer>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Customer>> {
    let sql = format!("{CUSTOMER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Customer>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Lookup by the normalized phone key (the login/uniqueness identity)
pub async fn find_by_normalized_phone(
    pool: &SqlitePool,
    phone_normalized: &str,
) -> RepoResult<Option<Customer>> {
    let sql = format!("{CUSTOMER_SELECT} WHERE phone_normalized = ?");
    let row = sqlx::query_as::<_, Customer>(&sql)
        .bind(phone_normalized)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_status(
    pool: &SqlitePool,
    status: CustomerStatus,
) -> RepoResult<Vec<Customer>> {
    let sql = format!("{CUSTOMER_SELECT} WHERE status = ? ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, Customer>(&sql)
        .bind(status)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn search(pool: &SqlitePool, query: &str) -> RepoResult<Vec<Customer>> {
    let pattern = format!("%{query}%");
    let sql = format!(
        "{CUSTOMER_SELECT} WHERE name LIKE ?1 OR phone LIKE ?1 OR company LIKE ?1 ORDER BY created_at DESC"
    );
    let rows = sqlx::query_as::<_, Customer>(&sql)
        .bind(&pattern)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn counts(pool: &SqlitePool) -> RepoResult<CustomerCounts> {
    let row = sqlx::query_as::<_, CustomerCounts>(
        "SELECT COUNT(*) AS total, \
         COALESCE(SUM(status = 'pending'), 0) AS pending, \
         COALESCE(SUM(status = 'active'), 0) AS active, \
         COALESCE(SUM(status = 'withdrawn'), 0) AS withdrawn \
         FROM customer",
    )
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Create a customer in PENDING with a zero balance.
///
/// The normalized phone must be unique; the UNIQUE index backs the check
/// against concurrent signups.
pub async fn create(pool: &SqlitePool, data: CustomerCreate) -> RepoResult<Customer> {
    if find_by_normalized_phone(pool, &data.phone_normalized)
        .await?
        .is_some()
    {
        return Err(RepoError::Duplicate(format!(
            "Phone '{}' already registered",
            data.phone
        )));
    }

    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO customer (id, name, phone, phone_normalized, password_hash, company, is_individual, total_points, status, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0, 'pending', ?8)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.phone)
    .bind(&data.phone_normalized)
    .bind(&data.password_hash)
    .bind(&data.company)
    .bind(data.is_individual)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create customer".into()))
}

/// Field-level patch applied by admin edit or profile self-service.
/// Phone and password changes arrive pre-normalized / pre-hashed.
#[derive(Debug, Clone, Default)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub phone_normalized: Option<String>,
    pub company: Option<String>,
    pub is_individual: Option<bool>,
    pub memo: Option<String>,
    pub password_hash: Option<String>,
}

pub async fn update(pool: &SqlitePool, id: i64, data: CustomerPatch) -> RepoResult<Customer> {
    let rows = sqlx::query(
        "UPDATE customer SET name = COALESCE(?1, name), phone = COALESCE(?2, phone), phone_normalized = COALESCE(?3, phone_normalized), company = COALESCE(?4, company), is_individual = COALESCE(?5, is_individual), memo = COALESCE(?6, memo), password_hash = COALESCE(?7, password_hash) WHERE id = ?8",
    )
    .bind(&data.name)
    .bind(&data.phone)
    .bind(&data.phone_normalized)
    .bind(&data.company)
    .bind(data.is_individual)
    .bind(&data.memo)
    .bind(&data.password_hash)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Customer {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Customer {id} not found")))
}

/// PENDING -> ACTIVE. Returns false when the customer is missing or not
/// pending; callers treat that as a skip, not an error.
pub async fn approve(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("UPDATE customer SET status = 'active' WHERE id = ? AND status = 'pending'")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// ACTIVE -> WITHDRAWN, stamping withdrawn_at. Returns false when no
/// transition happened (already withdrawn, pending, or missing).
pub async fn withdraw(pool: &SqlitePool, id: i64, timestamp: i64) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE customer SET status = 'withdrawn', withdrawn_at = ?1 WHERE id = ?2 AND status = 'active'",
    )
    .bind(timestamp)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// WITHDRAWN -> ACTIVE, clearing withdrawn_at.
pub async fn restore(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE customer SET status = 'active', withdrawn_at = NULL WHERE id = ? AND status = 'withdrawn'",
    )
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Hard delete. Ledger entries and notifications cascade via FK.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM customer WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Atomic balance increment. Returns false when the id does not resolve.
pub async fn add_points(pool: &SqlitePool, id: i64, amount: i64) -> RepoResult<bool> {
    let rows = sqlx::query("UPDATE customer SET total_points = total_points + ?1 WHERE id = ?2")
        .bind(amount)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Atomic floor-clamped decrement: the stored balance never goes below
/// zero regardless of the requested amount.
pub async fn deduct_points_clamped(pool: &SqlitePool, id: i64, amount: i64) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE customer SET total_points = MAX(total_points - ?1, 0) WHERE id = ?2",
    )
    .bind(amount)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Recompute the cached balance from the remaining ledger rows, floored
/// at zero. Used after a ledger entry is deleted.
pub async fn recompute_points(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE customer SET total_points = MAX((SELECT COALESCE(SUM(points), 0) FROM point_history WHERE customer_id = ?1), 0) WHERE id = ?1",
    )
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}
