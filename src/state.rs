//! Application state

use actix_web::web;
use chrono::Duration;
use sqlx::SqlitePool;

use crate::auth::TokenService;
use crate::config::Config;
use crate::services::{AuthService, TaskService};

/// Services shared across handlers. Built once at startup from the immutable `Config`.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub tasks: TaskService,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: &Config) -> Self {
        let tokens = TokenService::new(&config.jwt_secret, Duration::hours(config.token_ttl_hours));
        Self {
            auth: AuthService::new(pool.clone(), tokens.clone(), config.bcrypt_cost),
            tasks: TaskService::new(pool),
            tokens,
        }
    }

    /// Registers each service as `web::Data` so handlers and middleware can extract it.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.auth.clone()))
            .app_data(web::Data::new(self.tasks.clone()))
            .app_data(web::Data::new(self.tokens.clone()));
    }
}
