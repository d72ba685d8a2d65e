use super::{AuthError, CredentialHasher, SessionManager};
use crate::db::{
    find_retailer_by_email, insert_retailer, is_unique_violation, DbPool, LoginRequest,
    RegisterRequest,
};

/// Retailer registration and password login
#[derive(Debug, Clone)]
pub struct AccountService {
    db: DbPool,
    hasher: CredentialHasher,
    sessions: SessionManager,
}

impl AccountService {
    pub fn new(db: DbPool, hasher: CredentialHasher, sessions: SessionManager) -> Self {
        Self {
            db,
            hasher,
            sessions,
        }
    }

    /// Create a retailer account and return its id
    pub async fn register(&self, request: &RegisterRequest) -> Result<String, AuthError> {
        let email = normalize_email(&request.email);
        if find_retailer_by_email(&self.db, &email).await?.is_some() {
            return Err(AuthError::DuplicateAccount);
        }

        let password_hash = self.hasher.hash(&request.password);
        let id = insert_retailer(
            &self.db,
            &email,
            &password_hash,
            request.company.as_deref(),
            request.contact_name.as_deref(),
        )
        .await
        .map_err(|e| {
            // Two registrations for the same email can both pass the lookup
            if is_unique_violation(&e) {
                AuthError::DuplicateAccount
            } else {
                AuthError::Storage(e)
            }
        })?;

        tracing::info!(retailer_id = %id, "Registered retailer account");
        Ok(id)
    }

    /// Check credentials and issue a bearer token.
    ///
    /// Unknown email and wrong password both yield `InvalidCredentials`.
    pub async fn login(&self, request: &LoginRequest) -> Result<String, AuthError> {
        let retailer = find_retailer_by_email(&self.db, &normalize_email(&request.email))
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.hasher.verify(&request.password, &retailer.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.sessions.issue(&retailer.id).await?;
        tracing::info!(retailer_id = %retailer.id, "Retailer logged in");
        Ok(token)
    }
}

/// Canonical form of an account email: trimmed, with the domain lowercased.
///
/// The local part keeps its case.
fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_ascii_lowercase()),
        None => email.to_string(),
    }
}
