//! Inquiry Repository

use shared::models::{Inquiry, InquiryCreate};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

const INQUIRY_SELECT: &str = "SELECT id, customer_id, kind, content, created_at FROM inquiry";

pub async fn create(pool: &SqlitePool, data: InquiryCreate) -> RepoResult<Inquiry> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO inquiry (id, customer_id, kind, content, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(id)
    .bind(data.customer_id)
    .bind(data.kind)
    .bind(&data.content)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create inquiry".into()))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Inquiry>> {
    let sql = format!("{INQUIRY_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Inquiry>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Inquiry>> {
    let sql = format!("{INQUIRY_SELECT} ORDER BY created_at DESC, id DESC");
    let rows = sqlx::query_as::<_, Inquiry>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::customer;
    use crate::db::testing;
    use shared::models::{CustomerCreate, InquiryKind};

    #[tokio::test]
    async fn test_create_and_list() {
        let pool = testing::pool().await;
        let cid = customer::create(
            &pool,
            CustomerCreate {
                name: "Kim".to_string(),
                phone: "01012345678".to_string(),
                phone_normalized: "1012345678".to_string(),
                password_hash: "hash".to_string(),
                company: String::new(),
                is_individual: true,
            },
        )
        .await
        .unwrap()
        .id;

        let inq = create(
            &pool,
            InquiryCreate {
                customer_id: cid,
                kind: InquiryKind::PasswordReset,
                content: "비밀번호를 잊어버렸습니다".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(inq.kind, InquiryKind::PasswordReset);

        let all = find_all(&pool).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, inq.id);
    }
}
