use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use serde_json::{json, Value};

use crate::handlers::lead_dtos::{LeadRequest, LeadSubmitted, SUBMIT_FAILED_MESSAGE, SUBMIT_OK_MESSAGE};
use crate::AppState;

fn bad_request(error: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "success": false, "error": error })),
    )
}

pub async fn submit_lead(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LeadRequest>, JsonRejection>,
) -> Result<Json<LeadSubmitted>, (StatusCode, Json<Value>)> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!("Rejected lead body: {}", rejection.body_text());
        bad_request("Invalid request body")
    })?;

    let lead = request.into_lead().map_err(|e| {
        tracing::info!("Lead failed validation: {}", e.message());
        bad_request(e.message())
    })?;

    match state.leads.append(&lead, Utc::now()).await {
        Ok(rows_updated) => {
            tracing::info!("Stored lead from {} ({} row(s))", lead.email, rows_updated);
            Ok(Json(LeadSubmitted {
                success: true,
                message: SUBMIT_OK_MESSAGE,
                rows_updated,
            }))
        }
        Err(e) => {
            tracing::error!("Failed to store lead: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": SUBMIT_FAILED_MESSAGE,
                    "details": e.to_string(),
                })),
            ))
        }
    }
}
