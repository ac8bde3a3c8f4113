//! Point Ledger Model

use serde::{Deserialize, Serialize};

/// Ledger entry kind, persisted as 'earn' / 'use' / 'adjust'.
///
/// `Use` marks customer-initiated redemptions in the persisted contract;
/// administrative deductions are recorded as `Adjust`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum PointEntryType {
    Earn,
    Use,
    Adjust,
}

/// Point ledger entry (포인트 내역)
///
/// Append-only: one row per balance-affecting event, never updated.
/// `points` is positive for earns and negative for deductions, and records
/// the requested amount even when the balance write was clamped at zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PointHistory {
    pub id: i64,
    pub customer_id: i64,
    pub points: i64,
    #[serde(rename = "type")]
    #[cfg_attr(feature = "db", sqlx(rename = "type"))]
    pub entry_type: PointEntryType,
    /// Required by policy for deductions
    pub reason: Option<String>,
    pub created_at: i64,
}
