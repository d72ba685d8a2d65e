use thiserror::Error;

/// Failures raised by the authentication core.
///
/// The four token variants are kept distinct for logging; the HTTP layer
/// collapses them into a single 401 response.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,

    #[error("unknown session token")]
    InvalidToken,

    #[error("session token expired")]
    ExpiredToken,

    #[error("session references a retailer that no longer exists")]
    RetailerNotFound,

    #[error("an account with this email already exists")]
    DuplicateAccount,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("storage unavailable: {0}")]
    Storage(#[from] sqlx::Error),
}
