//! Liveness and storage diagnostics.

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::db::list_collections;
use crate::AppState;

/// Longest storage error excerpt included in the health report
const MAX_ERROR_CHARS: usize = 50;

/// Max collection names listed in the health report
const MAX_COLLECTIONS: usize = 10;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// GET /
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "LastDrop backend up",
    })
}

/// GET /api/hello
pub async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello from the backend API!",
    })
}

/// Storage health report
#[derive(Debug, Serialize)]
pub struct DatabaseReport {
    pub backend: String,
    pub database: String,
    /// Whether `DATABASE_URL` was supplied
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

/// Probe the document store
///
/// GET /test
pub async fn test_database(State(state): State<Arc<AppState>>) -> Json<DatabaseReport> {
    let mut report = DatabaseReport {
        backend: "Running".to_string(),
        database: "Not Available".to_string(),
        database_url: if std::env::var("DATABASE_URL").is_ok() {
            "Set".to_string()
        } else {
            "Not Set".to_string()
        },
        database_name: database_name(&state.config.database_url()),
        connection_status: "Not Connected".to_string(),
        collections: Vec::new(),
    };

    if state.db.is_closed() {
        return Json(report);
    }

    report.connection_status = "Connected".to_string();
    match list_collections(&state.db).await {
        Ok(mut collections) => {
            collections.truncate(MAX_COLLECTIONS);
            report.collections = collections;
            report.database = "Connected & Working".to_string();
        }
        Err(e) => {
            tracing::warn!(error = %e, "Health check query failed");
            report.database = format!("Connected but Error: {}", truncate(&e.to_string()));
        }
    }

    Json(report)
}

/// Database file name (or `memory`) from a sqlite URL
fn database_name(url: &str) -> String {
    let path = url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:");
    let path = path.split('?').next().unwrap_or(path);

    if path.is_empty() || path == ":memory:" {
        return "memory".to_string();
    }

    std::path::Path::new(path)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Unknown".to_string())
}

fn truncate(message: &str) -> String {
    message.chars().take(MAX_ERROR_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_name() {
        assert_eq!(database_name("sqlite:./data/lastdrop.db?mode=rwc"), "lastdrop");
        assert_eq!(database_name("sqlite:///var/lib/shop.sqlite"), "shop");
        assert_eq!(database_name("sqlite::memory:"), "memory");
    }

    #[test]
    fn test_truncate() {
        let long = "x".repeat(120);
        assert_eq!(truncate(&long).len(), MAX_ERROR_CHARS);
        assert_eq!(truncate("short"), "short");
    }
}
