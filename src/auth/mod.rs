//! Retailer authentication.
//!
//! Password hashing, bearer-session issuance and validation, and the
//! register/login flows built on top of them. Every order operation is
//! scoped by an [`AuthenticatedRetailer`], which only [`SessionManager`]
//! can produce.

mod account;
mod error;
mod password;
mod session;

pub use account::AccountService;
pub use error::AuthError;
pub use password::{CredentialHasher, DEFAULT_PASSWORD_SALT};
pub use session::{
    spawn_session_cleanup_task, AuthenticatedRetailer, SessionManager, SESSION_TTL_SECS,
};
