//! Middleware components for the HTTP API.

mod auth;
mod error_handler;
mod logging;
mod request_id;

pub use auth::AuthUser;
pub use error_handler::error_to_status_code;
pub use logging::logging_middleware;
pub use request_id::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
