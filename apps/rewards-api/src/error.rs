//! # API Error Types
//!
//! Maps every failure a handler can hit onto a status code and a
//! plain-text body.
//!
//! ## Status Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Caller-caused (4xx)                  System-caused (5xx)               │
//! │                                                                         │
//! │  InvalidJson        → 400             Calculation  → 500 (logged)       │
//! │  InvalidReceipt     → 400             Store        → 500 (logged)       │
//! │  InvalidReceiptId   → 400             InvalidGeneratedId → 500          │
//! │  NotFound           → 404                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Internal failures never leak their detail to the caller; the detail is
//! written to the log and the body carries a fixed message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rewards_core::{CalculationError, ValidationError};
use rewards_store::StoreError;
use thiserror::Error;
use tracing::{error, warn};

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Body was not a decodable receipt.
    #[error("Invalid JSON payload")]
    InvalidJson,

    #[error("Invalid receipt: {0}")]
    InvalidReceipt(ValidationError),

    #[error("Invalid receipt ID format: {0}")]
    InvalidReceiptId(ValidationError),

    #[error("No receipt found for that id")]
    NotFound,

    /// A stored receipt could not be scored.
    #[error("Error calculating points")]
    Calculation(#[from] CalculationError),

    /// The ID source produced an identifier that is not a valid receipt ID.
    #[error("Invalid generated ID: {0}")]
    InvalidGeneratedId(ValidationError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidJson | ApiError::InvalidReceipt(_) | ApiError::InvalidReceiptId(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Calculation(_) | ApiError::InvalidGeneratedId(_) | ApiError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Plain-text body sent to the caller.
    pub fn message(&self) -> String {
        match self {
            ApiError::Store(StoreError::IdGenerationExhausted { .. }) => {
                "Failed to generate unique receipt ID".to_string()
            }
            ApiError::Store(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            ApiError::Calculation(e) => error!(error = %e, "Points calculation failed"),
            ApiError::Store(e) => error!(error = %e, "Store operation failed"),
            ApiError::InvalidGeneratedId(e) => error!(error = %e, "Generated receipt ID rejected"),
            other => warn!(status = status.as_u16(), reason = %other, "Request rejected"),
        }

        // &'static str / String bodies are sent as text/plain; charset=utf-8
        (status, self.message()).into_response()
    }
}

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;
