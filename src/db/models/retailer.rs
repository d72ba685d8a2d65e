//! Retailer account models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The only account role in the system
pub const RETAILER_ROLE: &str = "retailer";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Retailer {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub company: Option<String>,
    pub contact_name: Option<String>,
    pub role: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub company: Option<String>,
    pub contact_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}
