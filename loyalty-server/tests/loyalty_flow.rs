//! Full lifecycle integration test against a file-backed database.
//!
//! Walks one customer through signup, approval, point mutations with the
//! floor clamp, withdrawal/restore gating and permanent deletion with the
//! ledger cascade, exercising the real migrations rather than a
//! hand-built schema.

use loyalty_server::db::repository::{customer, notification, point_history};
use loyalty_server::{AppError, DbService, accounts, notify, points};
use shared::models::{CustomerStatus, NotificationType, SignupRequest};

async fn open_db(dir: &std::path::Path) -> DbService {
    let path = dir.join("loyalty.db");
    DbService::new(&path.to_string_lossy()).await.unwrap()
}

fn signup_request(name: &str, phone: &str) -> SignupRequest {
    SignupRequest {
        name: name.to_string(),
        phone: phone.to_string(),
        password: "pass1234".to_string(),
        confirm_password: "pass1234".to_string(),
        company: None,
        is_individual: true,
    }
}

#[tokio::test]
async fn test_full_customer_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let db = open_db(dir.path()).await;
    let pool = &db.pool;

    // Signup lands in PENDING; login is gated until approval
    let c = accounts::sign_up(pool, signup_request("김철수", "010-1234-5678"))
        .await
        .unwrap();
    assert_eq!(c.status, CustomerStatus::Pending);
    assert!(matches!(
        accounts::login(pool, "01012345678", "pass1234").await,
        Err(AppError::PendingApproval)
    ));

    // Approval unlocks login, also via a differently formatted number
    let approved = accounts::approve_many(pool, &[c.id]).await.unwrap();
    assert_eq!(approved.approved.len(), 1);
    let logged_in = accounts::login(pool, "010 1234 5678", "pass1234")
        .await
        .unwrap();
    assert_eq!(logged_in.id, c.id);

    // Earn then over-deduct: balance clamps, ledger keeps both entries
    points::earn(pool, &[c.id], 1000).await.unwrap();
    let outcome = points::deduct(pool, &[c.id], 1500, "프로모션 정산")
        .await
        .unwrap();
    assert_eq!(outcome.customers[0].total_points, 0);

    let entries = points::history(pool, c.id).await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].points, -1500);
    assert_eq!(entries[1].points, 1000);

    // One notification per mutation
    let notifications = notification::find_by_customer(pool, c.id).await.unwrap();
    assert_eq!(notifications.len(), 2);
    assert!(notifications.iter().all(|n| n.notification_type == NotificationType::System));

    // Withdraw gates login distinctly from bad credentials; restore reopens
    accounts::withdraw(pool, c.id).await.unwrap();
    assert!(matches!(
        accounts::login(pool, "01012345678", "pass1234").await,
        Err(AppError::WithdrawnAccount)
    ));
    accounts::restore(pool, c.id).await.unwrap();
    assert!(accounts::login(pool, "01012345678", "pass1234").await.is_ok());

    // Permanent delete requires the exact name, then cascades the ledger
    assert!(matches!(
        accounts::permanently_delete(pool, c.id, "김영희").await,
        Err(AppError::ConfirmationMismatch)
    ));
    accounts::permanently_delete(pool, c.id, "김철수").await.unwrap();
    assert!(customer::find_by_id(pool, c.id).await.unwrap().is_none());
    assert!(point_history::find_by_customer(pool, c.id).await.unwrap().is_empty());
    assert!(notification::find_by_customer(pool, c.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_bulk_operations_tolerate_partial_failure() {
    let dir = tempfile::tempdir().unwrap();
    let db = open_db(dir.path()).await;
    let pool = &db.pool;

    let a = accounts::sign_up(pool, signup_request("A", "01011110001"))
        .await
        .unwrap();
    let b = accounts::sign_up(pool, signup_request("B", "01011110002"))
        .await
        .unwrap();
    accounts::approve_many(pool, &[a.id, b.id]).await.unwrap();

    // Earn over a list with a dangling id touches only the real customers
    let outcome = points::earn(pool, &[a.id, 424242, b.id], 100).await.unwrap();
    assert_eq!(outcome.requested, 3);
    assert_eq!(outcome.customers.len(), 2);

    // Broadcast reports a reduced success count instead of failing
    let sent = notify::broadcast(pool, Some(&[a.id, b.id, 424242]), "안내", "점검 예정")
        .await
        .unwrap();
    assert_eq!(sent.requested, 3);
    assert_eq!(sent.success_count, 2);

    // Balance survives a reopen of the same database file
    db.pool.close().await;
    let db = open_db(dir.path()).await;
    let reloaded = customer::find_by_id(&db.pool, a.id).await.unwrap().unwrap();
    assert_eq!(reloaded.total_points, 100);
}
