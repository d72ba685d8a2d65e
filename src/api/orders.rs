use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use super::error::ApiError;
use super::validation::validate_order;
use super::StatusResponse;
use crate::auth::AuthenticatedRetailer;
use crate::db::{ListOrdersResponse, OrderInput};
use crate::AppState;

/// List the caller's orders
///
/// GET /api/orders
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
    current: AuthenticatedRetailer,
) -> Result<Json<ListOrdersResponse>, ApiError> {
    let orders = state.orders.list(&current).await?;
    Ok(Json(ListOrdersResponse { orders }))
}

/// Create an order owned by the caller
///
/// POST /api/orders
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    current: AuthenticatedRetailer,
    Json(req): Json<OrderInput>,
) -> Result<Json<StatusResponse>, ApiError> {
    validate_order(&req)?;

    let id = state.orders.create(&current, &req).await?;
    Ok(Json(StatusResponse::created(id)))
}

/// Replace an order's fields
///
/// PUT /api/orders/:order_id
///
/// Answers `ok` even when nothing matched, so callers cannot probe which ids
/// exist for other retailers.
pub async fn update_order(
    State(state): State<Arc<AppState>>,
    current: AuthenticatedRetailer,
    Path(order_id): Path<String>,
    Json(req): Json<OrderInput>,
) -> Result<Json<StatusResponse>, ApiError> {
    validate_order(&req)?;

    if !state.orders.update(&current, &order_id, &req).await? {
        tracing::debug!(retailer_id = %current.id(), order_id = %order_id, "Update matched no order");
    }
    Ok(Json(StatusResponse::ok()))
}

/// Delete an order
///
/// DELETE /api/orders/:order_id
pub async fn delete_order(
    State(state): State<Arc<AppState>>,
    current: AuthenticatedRetailer,
    Path(order_id): Path<String>,
) -> Result<Json<StatusResponse>, ApiError> {
    if !state.orders.delete(&current, &order_id).await? {
        tracing::debug!(retailer_id = %current.id(), order_id = %order_id, "Delete matched no order");
    }
    Ok(Json(StatusResponse::ok()))
}
