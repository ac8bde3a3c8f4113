//! Account Lifecycle
//!
//! Signup validation, login gating and the status state machine:
//!
//! ```text
//! PENDING ──approve──▶ ACTIVE ◀──restore── WITHDRAWN
//!                        │                     ▲
//!                        └─────withdraw────────┘
//! ```
//!
//! Permanent deletion is reachable from any state behind a name
//! confirmation. There is no PENDING -> WITHDRAWN edge: a pending signup
//! is either approved or deleted.

use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng};
use sqlx::SqlitePool;

use shared::models::{Customer, CustomerCreate, CustomerStatus, CustomerUpdate, SignupRequest};
use shared::phone;

use crate::db::repository::customer::{self, CustomerPatch};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_PASSWORD_LEN, MAX_PHONE_LEN, MIN_PASSWORD_LEN,
    validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// Hash a raw password with Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;
    Ok(hash.to_string())
}

/// Verify a raw password against a stored Argon2 hash
pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(password_hash)
        .map_err(|e| AppError::internal(format!("Corrupt password hash: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Self-service signup. Creates a PENDING customer with a zero balance.
///
/// Validation order: required fields, password length, confirmation match,
/// then normalized-phone uniqueness (delegated to the repository, which
/// raises `Conflict` on collision).
pub async fn sign_up(pool: &SqlitePool, req: SignupRequest) -> AppResult<Customer> {
    validate_required_text(&req.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&req.phone, "phone", MAX_PHONE_LEN)?;
    validate_required_text(&req.password, "password", MAX_PASSWORD_LEN)?;
    if req.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if req.password != req.confirm_password {
        return Err(AppError::validation("password confirmation does not match"));
    }

    let phone_normalized = phone::normalize(&req.phone);
    if phone_normalized.is_empty() {
        return Err(AppError::validation("phone must contain digits"));
    }

    // Companies keep their name; individuals never carry one
    let company = if req.is_individual {
        String::new()
    } else {
        let company = req.company.unwrap_or_default();
        validate_required_text(&company, "company", MAX_NAME_LEN)?;
        company
    };

    let created = customer::create(
        pool,
        CustomerCreate {
            name: req.name.trim().to_string(),
            phone: req.phone.trim().to_string(),
            phone_normalized,
            password_hash: hash_password(&req.password)?,
            company,
            is_individual: req.is_individual,
        },
    )
    .await?;

    tracing::info!(customer_id = created.id, "Customer signed up (pending approval)");
    Ok(created)
}

/// Login with phone + password.
///
/// Credential errors come first and share one message, so the form cannot
/// probe which numbers are registered. Status gating applies only after
/// the credentials check out, with distinct errors for pending and
/// withdrawn accounts.
pub async fn login(pool: &SqlitePool, raw_phone: &str, password: &str) -> AppResult<Customer> {
    let normalized = phone::normalize(raw_phone);
    if normalized.is_empty() {
        return Err(AppError::invalid_credentials());
    }

    let found = customer::find_by_normalized_phone(pool, &normalized).await?;
    let Some(found) = found else {
        return Err(AppError::invalid_credentials());
    };

    if !verify_password(password, &found.password_hash)? {
        tracing::warn!(customer_id = found.id, "Login failed - invalid credentials");
        return Err(AppError::invalid_credentials());
    }

    match found.status {
        CustomerStatus::Pending => Err(AppError::PendingApproval),
        CustomerStatus::Withdrawn => Err(AppError::WithdrawnAccount),
        CustomerStatus::Active => Ok(found),
    }
}

/// Result of a bulk approval: ids that were missing or not pending are
/// skipped, so `approved.len()` may be less than `requested`.
#[derive(Debug, serde::Serialize)]
pub struct ApprovalOutcome {
    pub approved: Vec<Customer>,
    pub requested: usize,
}

/// Approve pending signups, PENDING -> ACTIVE.
pub async fn approve_many(pool: &SqlitePool, ids: &[i64]) -> AppResult<ApprovalOutcome> {
    let mut approved = Vec::new();
    for &id in ids {
        match customer::approve(pool, id).await {
            Ok(true) => {
                if let Some(c) = customer::find_by_id(pool, id).await? {
                    approved.push(c);
                }
            }
            Ok(false) => {
                tracing::warn!(customer_id = id, "Approve skipped: not found or not pending");
            }
            Err(e) => {
                tracing::warn!(customer_id = id, error = %e, "Approve failed");
            }
        }
    }
    tracing::info!(approved = approved.len(), requested = ids.len(), "Bulk approval done");
    Ok(ApprovalOutcome {
        approved,
        requested: ids.len(),
    })
}

/// A lifecycle transition result: `changed` is false for the idempotent
/// repeat case (withdrawing a withdrawn account, restoring an active one).
#[derive(Debug, serde::Serialize)]
pub struct TransitionOutcome {
    pub customer: Customer,
    pub changed: bool,
}

/// ACTIVE -> WITHDRAWN. Idempotent for already-withdrawn accounts;
/// rejected for pending ones (no such edge in the lifecycle).
pub async fn withdraw(pool: &SqlitePool, id: i64) -> AppResult<TransitionOutcome> {
    let found = customer::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Customer {id}")))?;

    match found.status {
        CustomerStatus::Pending => Err(AppError::business_rule(
            "Pending signups must be approved or deleted, not withdrawn",
        )),
        CustomerStatus::Withdrawn => Ok(TransitionOutcome {
            customer: found,
            changed: false,
        }),
        CustomerStatus::Active => {
            customer::withdraw(pool, id, shared::util::now_millis()).await?;
            let customer = customer::find_by_id(pool, id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Customer {id}")))?;
            tracing::info!(customer_id = id, "Customer withdrawn");
            Ok(TransitionOutcome {
                customer,
                changed: true,
            })
        }
    }
}

/// WITHDRAWN -> ACTIVE, clearing the withdrawal stamp.
pub async fn restore(pool: &SqlitePool, id: i64) -> AppResult<TransitionOutcome> {
    let found = customer::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Customer {id}")))?;

    match found.status {
        CustomerStatus::Pending => Err(AppError::business_rule(
            "Pending signups cannot be restored",
        )),
        CustomerStatus::Active => Ok(TransitionOutcome {
            customer: found,
            changed: false,
        }),
        CustomerStatus::Withdrawn => {
            customer::restore(pool, id).await?;
            let customer = customer::find_by_id(pool, id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Customer {id}")))?;
            tracing::info!(customer_id = id, "Customer restored");
            Ok(TransitionOutcome {
                customer,
                changed: true,
            })
        }
    }
}

/// Permanent, irreversible delete. The caller must re-type the customer's
/// exact name; ledger entries and notifications cascade away with the row.
pub async fn permanently_delete(
    pool: &SqlitePool,
    id: i64,
    confirmed_name: &str,
) -> AppResult<Customer> {
    let found = customer::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Customer {id}")))?;

    if confirmed_name != found.name {
        return Err(AppError::ConfirmationMismatch);
    }

    customer::delete(pool, id).await?;
    tracing::info!(customer_id = id, "Customer permanently deleted");
    Ok(found)
}

/// Admin edit or profile self-service. Phone changes re-run the
/// normalized uniqueness check; password changes are re-hashed.
pub async fn update_customer(
    pool: &SqlitePool,
    id: i64,
    data: CustomerUpdate,
) -> AppResult<Customer> {
    if let Some(name) = &data.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&data.company, "company", MAX_NAME_LEN)?;
    validate_optional_text(&data.memo, "memo", MAX_NOTE_LEN)?;

    let mut phone_normalized = None;
    if let Some(new_phone) = &data.phone {
        validate_required_text(new_phone, "phone", MAX_PHONE_LEN)?;
        let normalized = phone::normalize(new_phone);
        if normalized.is_empty() {
            return Err(AppError::validation("phone must contain digits"));
        }
        if let Some(other) = customer::find_by_normalized_phone(pool, &normalized).await?
            && other.id != id
        {
            return Err(AppError::conflict(format!(
                "Phone '{new_phone}' already registered"
            )));
        }
        phone_normalized = Some(normalized);
    }

    let password_hash = match &data.password {
        Some(raw) => {
            if raw.len() < MIN_PASSWORD_LEN {
                return Err(AppError::validation(format!(
                    "password must be at least {MIN_PASSWORD_LEN} characters"
                )));
            }
            Some(hash_password(raw)?)
        }
        None => None,
    };

    let updated = customer::update(
        pool,
        id,
        CustomerPatch {
            name: data.name,
            phone: data.phone,
            phone_normalized,
            company: data.company,
            is_individual: data.is_individual,
            memo: data.memo,
            password_hash,
        },
    )
    .await?;
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing;

    fn signup(name: &str, phone: &str, password: &str) -> SignupRequest {
        SignupRequest {
            name: name.to_string(),
            phone: phone.to_string(),
            password: password.to_string(),
            confirm_password: password.to_string(),
            company: None,
            is_individual: true,
        }
    }

    #[tokio::test]
    async fn test_signup_creates_pending_zero_balance() {
        let pool = testing::pool().await;
        let c = sign_up(&pool, signup("김철수", "010-1234-5678", "pass123"))
            .await
            .unwrap();
        assert_eq!(c.status, CustomerStatus::Pending);
        assert_eq!(c.total_points, 0);
        // Password is stored hashed, never as entered
        assert_ne!(c.password_hash, "pass123");
        assert!(verify_password("pass123", &c.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_signup_validation_order() {
        let pool = testing::pool().await;

        let mut req = signup("", "01012345678", "pass123");
        assert!(matches!(
            sign_up(&pool, req).await.unwrap_err(),
            AppError::Validation(_)
        ));

        req = signup("Kim", "01012345678", "abc");
        assert!(matches!(
            sign_up(&pool, req).await.unwrap_err(),
            AppError::Validation(_)
        ));

        req = signup("Kim", "01012345678", "pass123");
        req.confirm_password = "different".to_string();
        assert!(matches!(
            sign_up(&pool, req).await.unwrap_err(),
            AppError::Validation(_)
        ));

        req = signup("Kim", "no-digits", "pass123");
        assert!(matches!(
            sign_up(&pool, req).await.unwrap_err(),
            AppError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn test_signup_leading_zero_phones_collide() {
        let pool = testing::pool().await;
        sign_up(&pool, signup("Kim", "01012345678", "pass123"))
            .await
            .unwrap();
        // Same digits, no leading zero: same identity
        let err = sign_up(&pool, signup("Lee", "1012345678", "pass456"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        // Formatting-only difference also collides
        let err = sign_up(&pool, signup("Park", "010-1234-5678", "pass789"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_signup_company_required_for_business() {
        let pool = testing::pool().await;
        let mut req = signup("Kim", "01012345678", "pass123");
        req.is_individual = false;
        req.company = None;
        assert!(matches!(
            sign_up(&pool, req).await.unwrap_err(),
            AppError::Validation(_)
        ));

        let mut req = signup("Kim", "01012345678", "pass123");
        req.is_individual = false;
        req.company = Some("한빛상사".to_string());
        let c = sign_up(&pool, req).await.unwrap();
        assert_eq!(c.company, "한빛상사");
    }

    #[tokio::test]
    async fn test_signup_individual_clears_company() {
        let pool = testing::pool().await;
        let mut req = signup("Kim", "01012345678", "pass123");
        req.company = Some("무시됨".to_string());
        let c = sign_up(&pool, req).await.unwrap();
        assert_eq!(c.company, "");
    }

    #[tokio::test]
    async fn test_login_gating_by_status() {
        let pool = testing::pool().await;
        let c = sign_up(&pool, signup("Kim", "01012345678", "pass123"))
            .await
            .unwrap();

        // Correct credentials but still pending
        assert!(matches!(
            login(&pool, "01012345678", "pass123").await.unwrap_err(),
            AppError::PendingApproval
        ));

        approve_many(&pool, &[c.id]).await.unwrap();
        let logged_in = login(&pool, "010-1234-5678", "pass123").await.unwrap();
        assert_eq!(logged_in.id, c.id);

        withdraw(&pool, c.id).await.unwrap();
        assert!(matches!(
            login(&pool, "01012345678", "pass123").await.unwrap_err(),
            AppError::WithdrawnAccount
        ));
    }

    #[tokio::test]
    async fn test_login_bad_credentials_uniform_error() {
        let pool = testing::pool().await;
        let c = sign_up(&pool, signup("Kim", "01012345678", "pass123"))
            .await
            .unwrap();
        approve_many(&pool, &[c.id]).await.unwrap();

        // Wrong password and unknown phone produce the same error variant
        assert!(matches!(
            login(&pool, "01012345678", "wrong").await.unwrap_err(),
            AppError::Invalid(_)
        ));
        assert!(matches!(
            login(&pool, "01099999999", "pass123").await.unwrap_err(),
            AppError::Invalid(_)
        ));
    }

    #[tokio::test]
    async fn test_approve_many_skips_non_pending() {
        let pool = testing::pool().await;
        let a = sign_up(&pool, signup("A", "01011110001", "pass123"))
            .await
            .unwrap();
        let b = sign_up(&pool, signup("B", "01011110002", "pass123"))
            .await
            .unwrap();
        // b already active
        approve_many(&pool, &[b.id]).await.unwrap();

        let outcome = approve_many(&pool, &[a.id, b.id, 999]).await.unwrap();
        assert_eq!(outcome.requested, 3);
        assert_eq!(outcome.approved.len(), 1);
        assert_eq!(outcome.approved[0].id, a.id);
        assert_eq!(outcome.approved[0].status, CustomerStatus::Active);

        // b untouched by the redundant approval
        let b = customer::find_by_id(&pool, b.id).await.unwrap().unwrap();
        assert_eq!(b.status, CustomerStatus::Active);
    }

    #[tokio::test]
    async fn test_withdraw_idempotent_and_pending_rejected() {
        let pool = testing::pool().await;
        let c = sign_up(&pool, signup("Kim", "01012345678", "pass123"))
            .await
            .unwrap();

        assert!(matches!(
            withdraw(&pool, c.id).await.unwrap_err(),
            AppError::BusinessRule(_)
        ));

        approve_many(&pool, &[c.id]).await.unwrap();
        let first = withdraw(&pool, c.id).await.unwrap();
        assert!(first.changed);
        assert!(first.customer.withdrawn_at.is_some());

        let second = withdraw(&pool, c.id).await.unwrap();
        assert!(!second.changed);

        let restored = restore(&pool, c.id).await.unwrap();
        assert!(restored.changed);
        assert_eq!(restored.customer.withdrawn_at, None);
        assert!(!restore(&pool, c.id).await.unwrap().changed);
    }

    #[tokio::test]
    async fn test_permanent_delete_requires_exact_name() {
        let pool = testing::pool().await;
        let c = sign_up(&pool, signup("김철수", "01012345678", "pass123"))
            .await
            .unwrap();

        let err = permanently_delete(&pool, c.id, "Wrong Name")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ConfirmationMismatch));
        // Nothing deleted
        assert!(customer::find_by_id(&pool, c.id).await.unwrap().is_some());

        permanently_delete(&pool, c.id, "김철수").await.unwrap();
        assert!(customer::find_by_id(&pool, c.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_customer_phone_uniqueness() {
        let pool = testing::pool().await;
        let a = sign_up(&pool, signup("A", "01011110001", "pass123"))
            .await
            .unwrap();
        sign_up(&pool, signup("B", "01011110002", "pass123"))
            .await
            .unwrap();

        // Taking B's number fails
        let err = update_customer(
            &pool,
            a.id,
            CustomerUpdate {
                phone: Some("010-1111-0002".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        // Reformatting A's own number is fine
        let updated = update_customer(
            &pool,
            a.id,
            CustomerUpdate {
                phone: Some("010-1111-0001".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.phone, "010-1111-0001");
        assert_eq!(updated.phone_normalized, "1011110001");
    }

    #[tokio::test]
    async fn test_update_customer_password_rehash() {
        let pool = testing::pool().await;
        let c = sign_up(&pool, signup("Kim", "01012345678", "pass123"))
            .await
            .unwrap();
        approve_many(&pool, &[c.id]).await.unwrap();

        update_customer(
            &pool,
            c.id,
            CustomerUpdate {
                password: Some("newpass".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert!(login(&pool, "01012345678", "pass123").await.is_err());
        assert!(login(&pool, "01012345678", "newpass").await.is_ok());
    }
}
