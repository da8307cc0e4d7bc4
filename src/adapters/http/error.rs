//! Shared HTTP error body.

use serde::Serialize;

/// JSON error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Stable machine-readable code.
    pub code: String,
    /// Human-readable message.
    pub msg: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            msg: msg.into(),
        }
    }
}
