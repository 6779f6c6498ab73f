//! # Response Envelopes
//!
//! The two wire shapes the gateway produces: a success envelope with a
//! message and optional payload, and a failure envelope carrying the
//! store-provided error text.

use serde::Serialize;
use serde_json::Value;

use crate::dispatch::Outcome;

/// Success envelope: `{"message": ..., "value"?: ...}`.
#[derive(Debug, Clone, Serialize)]
pub struct OpResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl From<Outcome> for OpResponse {
    fn from(outcome: Outcome) -> Self {
        Self {
            message: outcome.message,
            value: outcome.value,
        }
    }
}

/// Failure envelope: `{"error": ...}`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
