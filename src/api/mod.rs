pub mod auth;
pub mod error;
mod leads;
mod orders;
mod system;
mod validation;

use axum::{
    http::HeaderValue,
    routing::{get, post, put},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::CorsConfig;
use crate::AppState;
use error::ApiError;

/// `{"status": "ok"}` with the new record's id when one was created
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok",
            id: None,
        }
    }

    pub fn created(id: String) -> Self {
        Self {
            status: "ok",
            id: Some(id),
        }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    // Order routes authenticate through the AuthenticatedRetailer extractor
    let api_routes = Router::new()
        .route("/hello", get(system::hello))
        .route("/leads", post(leads::create_lead))
        .route("/orders", get(orders::list_orders).post(orders::create_order))
        .route(
            "/orders/:order_id",
            put(orders::update_order).delete(orders::delete_order),
        );

    let cors = cors_layer(&state.config.cors);

    Router::new()
        .route("/", get(system::root))
        .route("/test", get(system::test_database))
        .nest("/api/auth", auth_routes)
        .nest("/api", api_routes)
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.allowed_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}

async fn not_found() -> ApiError {
    ApiError::not_found("Not found")
}
