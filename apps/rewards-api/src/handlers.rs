//! # Request Handlers
//!
//! Thin orchestration over rewards-core and rewards-store.
//!
//! ## Retrieve Points Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET /receipts/{id}/points                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_receipt_id ──── bad ────► 400                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  already processed? ───── yes ────► 200 {"points": 0}                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  receipts.get(id) ─────── none ───► 404                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  calculate_breakdown ──── err ────► 500                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  mark_processed(id) ───── lost ───► 200 {"points": 0}                   │
//! │       │ won                                                             │
//! │       ▼                                                                 │
//! │  200 {"points": N}                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The real score is served once per identifier; every later retrieval,
//! including one racing the first, answers zero.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};
use rewards_core::{calculate_breakdown, validate_receipt, validate_receipt_id, Receipt};
use tracing::{debug, info, warn};

use crate::dto::{PointsResponse, ProcessResponse};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

// =============================================================================
// Receipts
// =============================================================================

/// `POST /receipts/process`
///
/// Validates the receipt, stores it under a fresh ID and returns the ID.
pub async fn process_receipt(
    State(state): State<AppState>,
    payload: Result<Json<Receipt>, JsonRejection>,
) -> ApiResult<Json<ProcessResponse>> {
    let Json(receipt) = payload.map_err(|rejection| {
        debug!(reason = %rejection.body_text(), "Receipt payload rejected");
        ApiError::InvalidJson
    })?;

    validate_receipt(&receipt).map_err(ApiError::InvalidReceipt)?;

    let retailer = receipt.retailer.clone();
    let receipts = state.stores.receipts();
    let id = receipts.insert_with_generated_id(receipt)?;

    if let Err(e) = validate_receipt_id(&id) {
        receipts.remove(&id)?;
        return Err(ApiError::InvalidGeneratedId(e));
    }

    info!(receipt_id = %id, retailer = %retailer, "Receipt accepted");
    Ok(Json(ProcessResponse { id }))
}

/// `GET /receipts/{id}/points`
pub async fn get_points(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PointsResponse>> {
    validate_receipt_id(&id).map_err(ApiError::InvalidReceiptId)?;

    let markers = state.stores.markers();
    if markers.is_processed(&id)? {
        debug!(receipt_id = %id, "Points already served");
        return Ok(Json(PointsResponse { points: 0 }));
    }

    let receipt = state
        .stores
        .receipts()
        .get(&id)?
        .ok_or(ApiError::NotFound)?;

    let breakdown = calculate_breakdown(&receipt)?;
    debug!(receipt_id = %id, ?breakdown, "Points calculated");

    if !markers.mark_processed(&id)? {
        warn!(receipt_id = %id, "Concurrent retrieval already served points");
        return Ok(Json(PointsResponse { points: 0 }));
    }

    let points = breakdown.total();
    info!(receipt_id = %id, points, "Points served");
    Ok(Json(PointsResponse { points }))
}

// =============================================================================
// Health
// =============================================================================

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    "OK"
}
