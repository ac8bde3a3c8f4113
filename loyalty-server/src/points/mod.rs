//! Point Ledger
//!
//! Earn/deduct mutate a customer in three steps: one atomic balance
//! statement, a ledger append, a notification insert. The steps are
//! separate writes, not a transaction; the balance statement lands first
//! so the customer-visible number is always the one the admin produced,
//! and a ledger or notification failure is logged and skipped rather than
//! aborting the batch.
//!
//! Bulk operations iterate customers sequentially and tolerate per-target
//! failure: callers compare the returned set against `requested` instead
//! of assuming input size == output size.

use sqlx::SqlitePool;

use shared::models::{Customer, Notification, NotificationType, PointEntryType, PointHistory};

use crate::db::repository::{customer, notification, point_history};
use crate::utils::validation::{MAX_NOTE_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

/// Result of a bulk ledger mutation. Vectors hold only the customers that
/// were actually updated; skipped ids shrink them below `requested`.
#[derive(Debug, serde::Serialize)]
pub struct LedgerOutcome {
    pub customers: Vec<Customer>,
    pub entries: Vec<PointHistory>,
    pub notifications: Vec<Notification>,
    pub requested: usize,
}

/// Grant points to each customer in the list.
///
/// Per customer: balance `+= amount` (atomic), ledger entry `+amount`,
/// notification. Unresolvable ids are skipped.
pub async fn earn(pool: &SqlitePool, customer_ids: &[i64], amount: i64) -> AppResult<LedgerOutcome> {
    if amount <= 0 {
        return Err(AppError::validation("amount must be positive"));
    }

    let mut outcome = LedgerOutcome {
        customers: Vec::new(),
        entries: Vec::new(),
        notifications: Vec::new(),
        requested: customer_ids.len(),
    };

    for &id in customer_ids {
        match customer::add_points(pool, id, amount).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(customer_id = id, "Earn skipped: customer not found");
                continue;
            }
            Err(e) => {
                tracing::warn!(customer_id = id, error = %e, "Earn skipped: balance update failed");
                continue;
            }
        }

        record_mutation(
            pool,
            &mut outcome,
            id,
            amount,
            PointEntryType::Earn,
            None,
            "포인트 적립",
            format!("{amount} 포인트가 적립되었습니다."),
        )
        .await;
    }

    tracing::info!(
        updated = outcome.customers.len(),
        requested = outcome.requested,
        amount,
        "Points earned"
    );
    Ok(outcome)
}

/// Deduct points from each customer in the list. A reason is mandatory.
///
/// The stored balance is floor-clamped at zero, but the ledger entry
/// records the full requested amount: the ledger reflects what the admin
/// asked for, the balance what the customer ended up with.
pub async fn deduct(
    pool: &SqlitePool,
    customer_ids: &[i64],
    amount: i64,
    reason: &str,
) -> AppResult<LedgerOutcome> {
    if amount <= 0 {
        return Err(AppError::validation("amount must be positive"));
    }
    validate_required_text(reason, "reason", MAX_NOTE_LEN)?;

    let mut outcome = LedgerOutcome {
        customers: Vec::new(),
        entries: Vec::new(),
        notifications: Vec::new(),
        requested: customer_ids.len(),
    };

    for &id in customer_ids {
        match customer::deduct_points_clamped(pool, id, amount).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(customer_id = id, "Deduct skipped: customer not found");
                continue;
            }
            Err(e) => {
                tracing::warn!(customer_id = id, error = %e, "Deduct skipped: balance update failed");
                continue;
            }
        }

        record_mutation(
            pool,
            &mut outcome,
            id,
            -amount,
            PointEntryType::Adjust,
            Some(reason),
            "포인트 차감",
            format!("{amount} 포인트가 차감되었습니다. 사유: {reason}"),
        )
        .await;
    }

    tracing::info!(
        updated = outcome.customers.len(),
        requested = outcome.requested,
        amount,
        "Points deducted"
    );
    Ok(outcome)
}

/// Ledger append + notification after a successful balance write.
/// Failures here leave the balance as written and are only logged; the
/// ledger sum drifts until reconciled, which is the accepted trade-off
/// of the non-transactional sequence.
#[allow(clippy::too_many_arguments)]
async fn record_mutation(
    pool: &SqlitePool,
    outcome: &mut LedgerOutcome,
    customer_id: i64,
    points: i64,
    entry_type: PointEntryType,
    reason: Option<&str>,
    title: &str,
    content: String,
) {
    match point_history::create(pool, customer_id, points, entry_type, reason).await {
        Ok(entry) => outcome.entries.push(entry),
        Err(e) => {
            tracing::error!(customer_id, error = %e, "Ledger append failed after balance write");
        }
    }

    match notification::create(pool, customer_id, title, &content, NotificationType::System).await {
        Ok(n) => outcome.notifications.push(n),
        Err(e) => {
            tracing::warn!(customer_id, error = %e, "Notification dispatch failed");
        }
    }

    match customer::find_by_id(pool, customer_id).await {
        Ok(Some(c)) => outcome.customers.push(c),
        Ok(None) => {}
        Err(e) => {
            tracing::warn!(customer_id, error = %e, "Reload after mutation failed");
        }
    }
}

/// Per-customer ledger, newest first.
pub async fn history(pool: &SqlitePool, customer_id: i64) -> AppResult<Vec<PointHistory>> {
    customer::find_by_id(pool, customer_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Customer {customer_id}")))?;
    Ok(point_history::find_by_customer(pool, customer_id).await?)
}

/// Administrative deletion of a ledger entry.
///
/// The cached balance is recomputed from the remaining entries (floored
/// at zero) in the same call, so the balance/ledger invariant heals
/// instead of silently breaking. Returns the customer with the
/// recomputed balance.
pub async fn delete_entry(pool: &SqlitePool, entry_id: i64) -> AppResult<Customer> {
    let entry = point_history::find_by_id(pool, entry_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Ledger entry {entry_id}")))?;

    point_history::delete(pool, entry_id).await?;
    customer::recompute_points(pool, entry.customer_id).await?;

    let customer = customer::find_by_id(pool, entry.customer_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Customer {}", entry.customer_id)))?;
    tracing::info!(
        entry_id,
        customer_id = customer.id,
        balance = customer.total_points,
        "Ledger entry deleted, balance recomputed"
    );
    Ok(customer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing;
    use shared::models::CustomerCreate;

    async fn seed_customer(pool: &SqlitePool, phone: &str) -> i64 {
        customer::create(
            pool,
            CustomerCreate {
                name: "Kim".to_string(),
                phone: phone.to_string(),
                phone_normalized: shared::phone::normalize(phone),
                password_hash: "hash".to_string(),
                company: String::new(),
                is_individual: true,
            },
        )
        .await
        .unwrap()
        .id
    }

    async fn balance(pool: &SqlitePool, id: i64) -> i64 {
        customer::find_by_id(pool, id).await.unwrap().unwrap().total_points
    }

    async fn ledger_sum(pool: &SqlitePool, id: i64) -> i64 {
        point_history::find_by_customer(pool, id)
            .await
            .unwrap()
            .iter()
            .map(|e| e.points)
            .sum()
    }

    #[tokio::test]
    async fn test_earn_updates_balance_ledger_notification() {
        let pool = testing::pool().await;
        let cid = seed_customer(&pool, "01011110001").await;

        let outcome = earn(&pool, &[cid], 500).await.unwrap();
        assert_eq!(outcome.customers.len(), 1);
        assert_eq!(outcome.entries.len(), 1);
        assert_eq!(outcome.notifications.len(), 1);
        assert_eq!(outcome.customers[0].total_points, 500);
        assert_eq!(outcome.entries[0].points, 500);
        assert_eq!(outcome.entries[0].entry_type, PointEntryType::Earn);
        assert_eq!(outcome.notifications[0].title, "포인트 적립");
        assert!(outcome.notifications[0].content.contains("500"));
    }

    #[tokio::test]
    async fn test_earn_rejects_non_positive_amount() {
        let pool = testing::pool().await;
        let cid = seed_customer(&pool, "01011110001").await;
        assert!(earn(&pool, &[cid], 0).await.is_err());
        assert!(earn(&pool, &[cid], -10).await.is_err());
    }

    #[tokio::test]
    async fn test_earn_skips_missing_customers() {
        let pool = testing::pool().await;
        let a = seed_customer(&pool, "01011110001").await;
        let b = seed_customer(&pool, "01011110002").await;

        let outcome = earn(&pool, &[a, 999, b], 100).await.unwrap();
        assert_eq!(outcome.requested, 3);
        assert_eq!(outcome.customers.len(), 2);
        assert_eq!(outcome.entries.len(), 2);
        assert_eq!(balance(&pool, a).await, 100);
        assert_eq!(balance(&pool, b).await, 100);
    }

    #[tokio::test]
    async fn test_deduct_requires_reason() {
        let pool = testing::pool().await;
        let cid = seed_customer(&pool, "01011110001").await;
        earn(&pool, &[cid], 100).await.unwrap();

        let err = deduct(&pool, &[cid], 50, "  ").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(balance(&pool, cid).await, 100);
    }

    #[tokio::test]
    async fn test_deduct_records_reason_and_requested_amount() {
        let pool = testing::pool().await;
        let cid = seed_customer(&pool, "01011110001").await;
        earn(&pool, &[cid], 300).await.unwrap();

        let outcome = deduct(&pool, &[cid], 1000, "이벤트 취소").await.unwrap();
        // Balance clamps at zero...
        assert_eq!(outcome.customers[0].total_points, 0);
        // ...but the ledger records the full requested deduction
        assert_eq!(outcome.entries[0].points, -1000);
        assert_eq!(outcome.entries[0].entry_type, PointEntryType::Adjust);
        assert_eq!(outcome.entries[0].reason.as_deref(), Some("이벤트 취소"));
        assert!(outcome.notifications[0].content.contains("이벤트 취소"));
    }

    #[tokio::test]
    async fn test_balance_follows_earn_deduct_sequence() {
        let pool = testing::pool().await;
        let cid = seed_customer(&pool, "01011110001").await;

        earn(&pool, &[cid], 1000).await.unwrap();
        deduct(&pool, &[cid], 300, "사용").await.unwrap();
        earn(&pool, &[cid], 50).await.unwrap();
        deduct(&pool, &[cid], 200, "사용").await.unwrap();

        // max(0, 1000 - 300 + 50 - 200) with no intermediate clamp
        assert_eq!(balance(&pool, cid).await, 550);
        assert_eq!(ledger_sum(&pool, cid).await, 550);
    }

    #[tokio::test]
    async fn test_clamped_deduct_diverges_ledger_from_balance() {
        let pool = testing::pool().await;
        let cid = seed_customer(&pool, "01011110001").await;

        earn(&pool, &[cid], 100).await.unwrap();
        deduct(&pool, &[cid], 500, "정산").await.unwrap();

        // Clamp keeps the stored balance at zero while the ledger sum goes
        // negative: the documented tension of recording requested amounts.
        assert_eq!(balance(&pool, cid).await, 0);
        assert_eq!(ledger_sum(&pool, cid).await, -400);
    }

    #[tokio::test]
    async fn test_bulk_earn_touches_every_customer() {
        let pool = testing::pool().await;
        let a = seed_customer(&pool, "01011110001").await;
        let b = seed_customer(&pool, "01011110002").await;
        let c = seed_customer(&pool, "01011110003").await;

        let outcome = earn(&pool, &[a, b, c], 42).await.unwrap();
        assert_eq!(outcome.customers.len(), 3);
        for id in [a, b, c] {
            assert_eq!(balance(&pool, id).await, 42);
            assert_eq!(ledger_sum(&pool, id).await, 42);
        }
    }

    #[tokio::test]
    async fn test_history_newest_first() {
        let pool = testing::pool().await;
        let cid = seed_customer(&pool, "01011110001").await;
        earn(&pool, &[cid], 100).await.unwrap();
        deduct(&pool, &[cid], 40, "사용").await.unwrap();

        let entries = history(&pool, cid).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].points, -40);
        assert_eq!(entries[1].points, 100);
    }

    #[tokio::test]
    async fn test_history_unknown_customer() {
        let pool = testing::pool().await;
        assert!(matches!(
            history(&pool, 999).await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_delete_entry_recomputes_balance() {
        let pool = testing::pool().await;
        let cid = seed_customer(&pool, "01011110001").await;
        let first = earn(&pool, &[cid], 1000).await.unwrap();
        earn(&pool, &[cid], 200).await.unwrap();
        assert_eq!(balance(&pool, cid).await, 1200);

        let updated = delete_entry(&pool, first.entries[0].id).await.unwrap();
        assert_eq!(updated.total_points, 200);
        assert_eq!(ledger_sum(&pool, cid).await, 200);
    }

    #[tokio::test]
    async fn test_delete_entry_floors_recomputed_balance() {
        let pool = testing::pool().await;
        let cid = seed_customer(&pool, "01011110001").await;
        let earned = earn(&pool, &[cid], 100).await.unwrap();
        deduct(&pool, &[cid], 80, "사용").await.unwrap();

        // Remaining ledger sums to -80; the recomputed balance clamps to 0
        let updated = delete_entry(&pool, earned.entries[0].id).await.unwrap();
        assert_eq!(updated.total_points, 0);
    }

    #[tokio::test]
    async fn test_delete_entry_unknown_id() {
        let pool = testing::pool().await;
        assert!(matches!(
            delete_entry(&pool, 999).await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }
}
