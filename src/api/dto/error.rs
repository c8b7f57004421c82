//! Error response DTO.

use serde::Serialize;
use utoipa::ToSchema;

use crate::error::ValidationFieldError;

/// Failure envelope: same `success`/`message` shape as successes, with a
/// machine-readable code and optional per-field validation details.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always false
    pub success: bool,
    /// Stable machine-readable error code
    #[schema(example = "NOT_FOUND")]
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Per-field validation failures, when applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Vec<Object>>)]
    pub errors: Option<Vec<ValidationFieldError>>,
}

impl ErrorResponse {
    /// Creates a new error response with code and message.
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            success: false,
            code: code.to_string(),
            message: message.to_string(),
            errors: None,
        }
    }

    /// Attaches per-field validation details.
    pub fn with_errors(mut self, errors: Vec<ValidationFieldError>) -> Self {
        self.errors = Some(errors);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_success_false() {
        let body = ErrorResponse::new("NOT_FOUND", "Genre not found");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Genre not found");
        assert!(json.get("errors").is_none());
    }
}
