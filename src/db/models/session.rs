//! Bearer session records.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub token: String,
    pub retailer_id: String,
    /// Absolute expiry as Unix seconds
    pub expires_at: i64,
    pub created_at: String,
}

impl Session {
    /// A session stays usable up to and including its expiry second
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at < now
    }
}
