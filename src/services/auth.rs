//! Signup and login.

use std::sync::Arc;

use sqlx::SqlitePool;
use tokio::sync::OnceCell;
use validator::Validate;

use crate::auth::password::{hash_password_blocking, verify_password_blocking};
use crate::auth::TokenService;
use crate::error::AppError;
use crate::models::{LoginRequest, SignupRequest, TokenResponse, UserSummary};
use crate::store::users;

#[derive(Clone)]
pub struct AuthService {
    pool: SqlitePool,
    tokens: TokenService,
    bcrypt_cost: u32,
    /// Hash checked against when the identity is unknown, so both login failures pay
    /// for one bcrypt verification at the configured cost.
    decoy_hash: Arc<OnceCell<String>>,
}

impl AuthService {
    pub fn new(pool: SqlitePool, tokens: TokenService, bcrypt_cost: u32) -> Self {
        Self {
            pool,
            tokens,
            bcrypt_cost,
            decoy_hash: Arc::new(OnceCell::new()),
        }
    }

    async fn decoy_hash(&self) -> Result<String, AppError> {
        self.decoy_hash
            .get_or_try_init(|| hash_password_blocking("decoy-password".to_string(), self.bcrypt_cost))
            .await
            .cloned()
    }

    /// Creates an account and returns its id and identity.
    ///
    /// Fails with `DuplicateIdentity` if the identity is taken, whatever the other fields.
    pub async fn register(&self, input: SignupRequest) -> Result<UserSummary, AppError> {
        input.validate()?;

        let mut conn = self.pool.acquire().await?;
        if users::find_by_identity(&mut conn, &input.identity).await?.is_some() {
            log::warn!("Signup rejected: identity already registered");
            return Err(AppError::DuplicateIdentity);
        }

        let password_hash = hash_password_blocking(input.password, self.bcrypt_cost).await?;
        let user = users::insert(&mut conn, &input.name, &input.identity, &password_hash).await?;

        log::info!("Registered user {}", user.id);
        Ok(UserSummary::from(&user))
    }

    /// Checks the credentials and issues a bearer token for the identity.
    ///
    /// An unknown identity and a wrong password produce the same `InvalidCredentials`.
    pub async fn authenticate(&self, input: LoginRequest) -> Result<TokenResponse, AppError> {
        input.validate()?;

        let user = {
            let mut conn = self.pool.acquire().await?;
            users::find_by_identity(&mut conn, &input.identity).await?
        };

        let user = match user {
            Some(user) => user,
            None => {
                verify_password_blocking(input.password, self.decoy_hash().await?).await?;
                log::warn!("Login failed: unknown identity");
                return Err(AppError::InvalidCredentials);
            }
        };

        if !verify_password_blocking(input.password, user.password_hash).await? {
            log::warn!("Login failed for user {}: wrong password", user.id);
            return Err(AppError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user.identity)?;
        log::info!("User {} logged in", user.id);
        Ok(TokenResponse::bearer(token))
    }
}
