//! The uniform response envelope.
//!
//! Every success and failure answer carries `success`, an optional
//! `message` and the payload; paginated listings additionally embed the
//! page metadata. Failures are produced exclusively by the `AppError`
//! response mapping so the shape never diverges.

use serde::Serialize;
use utoipa::ToSchema;

use crate::api::dto::pagination::{PageMeta, PaginationParams};

/// Standard single-payload envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying only data.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// Successful response with a human-readable message.
    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Successful response carrying only a message (used by deletes).
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// Envelope for paginated listings.
#[derive(Debug, Serialize, ToSchema)]
pub struct Paginated<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Paginated<T> {
    /// Builds the paginated envelope from a page of rows and the total
    /// match count.
    pub fn new(data: Vec<T>, params: &PaginationParams, total: i64) -> Self {
        Self {
            success: true,
            meta: PageMeta::new(params, total),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_envelope_skips_empty_fields() {
        let response = ApiResponse::ok(42);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], 42);
        assert!(json.get("message").is_none());
    }

    #[test]
    fn message_is_included_when_set() {
        let response = ApiResponse::with_message("payload", "Book restored");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["message"], "Book restored");
    }

    #[test]
    fn paginated_envelope_embeds_meta() {
        let params = PaginationParams { page: 2, limit: 5 }.normalize();
        let response = Paginated::new(vec![1, 2, 3, 4, 5], &params, 12);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["meta"]["page"], 2);
        assert_eq!(json["meta"]["limit"], 5);
        assert_eq!(json["meta"]["total"], 12);
        assert_eq!(json["meta"]["total_pages"], 3);
    }
}
