//! Inquiry Model

use serde::{Deserialize, Serialize};

/// Customer-initiated request kind.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum InquiryKind {
    ProfileChange,
    PasswordReset,
}

impl InquiryKind {
    /// Korean display label (UI boundary only)
    pub fn label(&self) -> &'static str {
        match self {
            Self::ProfileChange => "정보 변경 요청",
            Self::PasswordReset => "비밀번호 재설정 요청",
        }
    }
}

/// Customer inquiry (문의) — a request the admin handles out of band.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Inquiry {
    pub id: i64,
    pub customer_id: i64,
    pub kind: InquiryKind,
    pub content: String,
    pub created_at: i64,
}

/// Create inquiry payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InquiryCreate {
    pub customer_id: i64,
    pub kind: InquiryKind,
    pub content: String,
}
