use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A stored account. Deliberately not `Serialize`: the hash must never leave the server.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    /// Unique, case-sensitive login string.
    pub identity: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for `POST /auth/signup`.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Display name.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(alias = "email", alias = "Email")]
    #[validate(length(min = 1, max = 254))]
    pub identity: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Payload for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(alias = "email", alias = "Email")]
    #[validate(length(min = 1))]
    pub identity: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// What signup hands back: enough to identify the account, nothing secret.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSummary {
    pub id: i64,
    pub identity: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            identity: user.identity.clone(),
        }
    }
}

/// Response body of a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}
