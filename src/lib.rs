pub mod api;
pub mod auth;
pub mod config;
pub mod db;

pub use db::DbPool;

use config::Config;

use crate::auth::{AccountService, CredentialHasher, SessionManager};
use crate::db::OrderStore;

/// Shared handles injected into every request handler
pub struct AppState {
    pub config: Config,
    pub db: DbPool,
    pub sessions: SessionManager,
    pub accounts: AccountService,
    pub orders: OrderStore,
}

impl AppState {
    pub fn new(config: Config, db: DbPool) -> Self {
        let hasher = CredentialHasher::new(config.auth.password_salt.clone());
        let sessions = SessionManager::new(db.clone());
        let accounts = AccountService::new(db.clone(), hasher, sessions.clone());
        let orders = OrderStore::new(db.clone());
        Self {
            config,
            db,
            sessions,
            accounts,
            orders,
        }
    }
}
