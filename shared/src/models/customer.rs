//! Customer Model

use serde::{Deserialize, Serialize};

/// Customer lifecycle status (고객 상태)
///
/// Persisted as the stable lowercase codes 'pending' / 'active' /
/// 'withdrawn'; display text belongs to the presentation layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum CustomerStatus {
    Pending,
    Active,
    Withdrawn,
}

impl CustomerStatus {
    /// Korean display label (UI boundary only)
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "대기",
            Self::Active => "활성",
            Self::Withdrawn => "탈퇴",
        }
    }
}

/// Customer entity (회원)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: i64,
    pub name: String,
    /// Phone as entered at signup (display form)
    pub phone: String,
    /// Digits-only, leading zeros stripped; the login/uniqueness key
    pub phone_normalized: String,
    /// Argon2 hash of the customer password
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Empty for individuals
    pub company: String,
    pub is_individual: bool,
    pub total_points: i64,
    pub status: CustomerStatus,
    pub memo: Option<String>,
    pub created_at: i64,
    pub withdrawn_at: Option<i64>,
}

/// Self-service signup payload (raw form fields, pre-validation)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
    pub company: Option<String>,
    pub is_individual: bool,
}

/// Create customer payload (post-validation, hashed password)
#[derive(Debug, Clone)]
pub struct CustomerCreate {
    pub name: String,
    pub phone: String,
    pub phone_normalized: String,
    pub password_hash: String,
    pub company: String,
    pub is_individual: bool,
}

/// Update customer payload (admin edit or profile self-service)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub is_individual: Option<bool>,
    pub memo: Option<String>,
    /// New raw password; hashed before it reaches the repository
    pub password: Option<String>,
}
