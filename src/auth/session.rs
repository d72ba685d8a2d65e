use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Utc};
use rand::Rng;
use tokio::time::{interval, Duration};

use super::AuthError;
use crate::db::{find_retailer_by_id, DbPool, Retailer, Session};

/// Session lifetime: 7 days, fixed at issuance and never extended
pub const SESSION_TTL_SECS: i64 = 60 * 60 * 24 * 7;

/// A retailer resolved from a live session.
///
/// Only [`SessionManager::validate`] hands these out, so holding one proves the
/// caller presented a valid token. Order operations take it as their scope.
#[derive(Debug, Clone)]
pub struct AuthenticatedRetailer {
    retailer: Retailer,
}

impl AuthenticatedRetailer {
    pub(crate) fn new(retailer: Retailer) -> Self {
        Self { retailer }
    }

    pub fn id(&self) -> &str {
        &self.retailer.id
    }

    pub fn retailer(&self) -> &Retailer {
        &self.retailer
    }
}

/// Generate an opaque URL-safe token from 256 random bits
fn generate_token() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 32] = rng.random();
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Issues and validates bearer sessions
#[derive(Debug, Clone)]
pub struct SessionManager {
    db: DbPool,
}

impl SessionManager {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// Create a session for `retailer_id` and return the raw token
    pub async fn issue(&self, retailer_id: &str) -> Result<String, AuthError> {
        let session = self.issue_at(retailer_id, Utc::now()).await?;
        Ok(session.token)
    }

    pub async fn issue_at(
        &self,
        retailer_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Session, AuthError> {
        let session = Session {
            token: generate_token(),
            retailer_id: retailer_id.to_string(),
            expires_at: now.timestamp() + SESSION_TTL_SECS,
            created_at: now.to_rfc3339(),
        };

        sqlx::query(
            "INSERT INTO sessions (token, retailer_id, expires_at, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&session.token)
        .bind(&session.retailer_id)
        .bind(session.expires_at)
        .bind(&session.created_at)
        .execute(&self.db)
        .await?;

        tracing::debug!(retailer_id = %retailer_id, expires_at = session.expires_at, "Session issued");
        Ok(session)
    }

    /// Resolve a token to the retailer it was issued for
    pub async fn validate(&self, token: &str) -> Result<AuthenticatedRetailer, AuthError> {
        self.validate_at(token, Utc::now().timestamp()).await
    }

    /// Same as [`validate`](Self::validate) against an explicit clock (Unix seconds)
    pub async fn validate_at(
        &self,
        token: &str,
        now: i64,
    ) -> Result<AuthenticatedRetailer, AuthError> {
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }

        let session: Session = sqlx::query_as("SELECT * FROM sessions WHERE token = ?")
            .bind(token)
            .fetch_optional(&self.db)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        if session.is_expired_at(now) {
            return Err(AuthError::ExpiredToken);
        }

        let retailer = find_retailer_by_id(&self.db, &session.retailer_id)
            .await?
            .ok_or(AuthError::RetailerNotFound)?;

        Ok(AuthenticatedRetailer::new(retailer))
    }

    /// Delete sessions that expired before `now`
    pub async fn purge_expired(&self, now: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at < ?")
            .bind(now)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected())
    }
}

/// Spawn the background sweep of expired session records
pub fn spawn_session_cleanup_task(sessions: SessionManager, interval_secs: u64) {
    if interval_secs == 0 {
        tracing::info!("Session cleanup is disabled");
        return;
    }

    tracing::info!(interval_secs = interval_secs, "Starting session cleanup task");

    tokio::spawn(async move {
        let mut tick = interval(Duration::from_secs(interval_secs));
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tick.tick().await;
            match sessions.purge_expired(Utc::now().timestamp()).await {
                Ok(0) => {}
                Ok(removed) => tracing::info!(removed = removed, "Purged expired sessions"),
                Err(e) => tracing::error!(error = %e, "Session cleanup failed"),
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{insert_retailer, test_pool};

    async fn setup() -> (SessionManager, String) {
        let pool = test_pool().await;
        let retailer_id = insert_retailer(&pool, "a@x.com", "hash", None, None)
            .await
            .unwrap();
        (SessionManager::new(pool), retailer_id)
    }

    #[test]
    fn test_generate_token() {
        let token = generate_token();
        assert_eq!(token.len(), 43);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        assert_ne!(token, generate_token());
    }

    #[tokio::test]
    async fn test_issue_then_validate() {
        let (sessions, retailer_id) = setup().await;
        let token = sessions.issue(&retailer_id).await.unwrap();

        let current = sessions.validate(&token).await.unwrap();
        assert_eq!(current.id(), retailer_id);
        assert_eq!(current.retailer().email, "a@x.com");
    }

    #[tokio::test]
    async fn test_expiry_is_seven_days() {
        let (sessions, retailer_id) = setup().await;
        let now = Utc::now();
        let session = sessions.issue_at(&retailer_id, now).await.unwrap();
        assert_eq!(session.expires_at - now.timestamp(), 604_800);
    }

    #[tokio::test]
    async fn test_expiry_boundary() {
        let (sessions, retailer_id) = setup().await;
        let session = sessions.issue_at(&retailer_id, Utc::now()).await.unwrap();

        assert!(sessions
            .validate_at(&session.token, session.expires_at - 1)
            .await
            .is_ok());
        assert!(matches!(
            sessions.validate_at(&session.token, session.expires_at + 1).await,
            Err(AuthError::ExpiredToken)
        ));
    }

    #[tokio::test]
    async fn test_rejections() {
        let (sessions, retailer_id) = setup().await;

        assert!(matches!(
            sessions.validate("").await,
            Err(AuthError::MissingToken)
        ));
        assert!(matches!(
            sessions.validate("not-a-real-token").await,
            Err(AuthError::InvalidToken)
        ));

        let token = sessions.issue(&retailer_id).await.unwrap();
        sqlx::query("DELETE FROM retailers WHERE id = ?")
            .bind(&retailer_id)
            .execute(&sessions.db)
            .await
            .unwrap();
        assert!(matches!(
            sessions.validate(&token).await,
            Err(AuthError::RetailerNotFound)
        ));
    }

    #[tokio::test]
    async fn test_tokens_are_unique_per_login() {
        let (sessions, retailer_id) = setup().await;
        let first = sessions.issue(&retailer_id).await.unwrap();
        let second = sessions.issue(&retailer_id).await.unwrap();
        assert_ne!(first, second);
        assert!(sessions.validate(&first).await.is_ok());
        assert!(sessions.validate(&second).await.is_ok());
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let (sessions, retailer_id) = setup().await;
        let now = Utc::now();
        let old = sessions
            .issue_at(&retailer_id, now - chrono::Duration::days(8))
            .await
            .unwrap();
        let fresh = sessions.issue_at(&retailer_id, now).await.unwrap();

        let removed = sessions.purge_expired(now.timestamp()).await.unwrap();
        assert_eq!(removed, 1);

        assert!(matches!(
            sessions.validate(&old.token).await,
            Err(AuthError::InvalidToken)
        ));
        assert!(sessions.validate(&fresh.token).await.is_ok());
    }

    #[tokio::test]
    async fn test_storage_failure_surfaces() {
        let (sessions, _) = setup().await;
        sessions.db.close().await;
        assert!(matches!(
            sessions.validate("anything").await,
            Err(AuthError::Storage(_))
        ));
    }
}
