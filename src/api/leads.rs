use axum::{extract::State, Json};
use std::sync::Arc;

use super::error::ApiError;
use super::validation::validate_lead;
use super::StatusResponse;
use crate::db::{insert_lead, CreateLeadRequest};
use crate::AppState;

/// Capture a contact request from the landing page
///
/// POST /api/leads
pub async fn create_lead(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateLeadRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    validate_lead(&req)?;

    let id = insert_lead(&state.db, &req).await?;
    tracing::info!(lead_id = %id, role = %req.role, "Lead captured");
    Ok(Json(StatusResponse::created(id)))
}
