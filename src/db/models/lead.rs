//! Lead capture models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Self-identified role of a contact
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LeadRole {
    Retailer,
    #[default]
    Consumer,
    Other,
}

impl std::fmt::Display for LeadRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Retailer => write!(f, "retailer"),
            Self::Consumer => write!(f, "consumer"),
            Self::Other => write!(f, "other"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub company: Option<String>,
    pub message: Option<String>,
    pub consent: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateLeadRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: LeadRole,
    pub company: Option<String>,
    pub message: Option<String>,
    #[serde(default = "default_consent")]
    pub consent: bool,
}

fn default_consent() -> bool {
    true
}
