//! Authentication-related Data Transfer Objects

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::User;

/// Register request payload
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct RegisterRequest {
    /// Username (unique)
    #[validate(length(min = 3, max = 20, message = "Username must be between 3 and 20 characters"))]
    #[schema(example = "jane_doe", min_length = 3, max_length = 20)]
    pub username: String,
    /// User's email address (unique)
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jane@example.com", format = "email")]
    pub email: String,
    /// User's password (plain text, will be hashed)
    #[validate(length(min = 6, max = 30, message = "Password must be between 6 and 30 characters"))]
    #[schema(example = "secret123", format = "password", min_length = 6, max_length = 30)]
    pub password: String,
}

/// Login request payload
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct LoginRequest {
    /// User's email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jane@example.com", format = "email")]
    pub email: String,
    /// User's password (plain text)
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    #[schema(example = "secret123", format = "password")]
    pub password: String,
}

/// User projection returned by auth endpoints (never includes the hash).
#[derive(Debug, Serialize, ToSchema)]
pub struct UserInfo {
    /// User ID
    #[schema(example = 1)]
    pub id: i32,
    /// Username
    #[schema(example = "jane_doe")]
    pub username: String,
    /// Email address
    #[schema(example = "jane@example.com")]
    pub email: String,
    /// Creation timestamp (ISO 8601)
    pub created_at: String,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        }
    }
}

/// Response for register and login: the user plus the bearer credential.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    /// User information
    pub user: UserInfo,
    /// Signed bearer token (24-hour validity)
    #[schema(example = "eyJ0eXAiOiJKV1QiLCJhbGc...")]
    pub token: String,
}
