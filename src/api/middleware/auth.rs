//! Bearer-token authentication guard.
//!
//! `AuthUser` is an extractor: any handler that takes it as an argument is
//! a guarded route. Extraction verifies the `Authorization: Bearer <token>`
//! header against the configured secret and surfaces the decoded identity;
//! every failure mode (missing header, malformed prefix, bad signature,
//! expiry) answers 401 through the uniform error envelope.

use axum::{extract::FromRequestParts, http::header, http::request::Parts};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt::{validate_token, Claims};

/// Authenticated caller identity decoded from the bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    /// User ID from JWT claims
    pub user_id: i32,
    /// User email from JWT claims
    pub email: String,
}

impl TryFrom<Claims> for AuthUser {
    type Error = AppError;

    fn try_from(claims: Claims) -> Result<Self, AppError> {
        Ok(Self {
            user_id: claims.user_id()?,
            email: claims.email,
        })
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized {
                message: "Missing authorization header".to_string(),
            })?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized {
                message: "Invalid authorization header format. Expected: Bearer <token>"
                    .to_string(),
            })?;

        let claims = validate_token(token, &state.jwt_config.secret)?;
        AuthUser::try_from(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::jwt::generate_token;

    #[test]
    fn test_auth_user_from_claims() {
        let claims = Claims {
            sub: "123".to_string(),
            email: "reader@example.com".to_string(),
            iat: 0,
            exp: 9999999999,
        };

        let auth_user = AuthUser::try_from(claims).unwrap();
        assert_eq!(auth_user.user_id, 123);
        assert_eq!(auth_user.email, "reader@example.com");
    }

    #[test]
    fn test_auth_user_from_claims_invalid_id() {
        let claims = Claims {
            sub: "invalid".to_string(),
            email: "reader@example.com".to_string(),
            iat: 0,
            exp: 9999999999,
        };

        assert!(AuthUser::try_from(claims).is_err());
    }

    #[test]
    fn test_generated_token_round_trips_to_auth_user() {
        let secret = "test_secret_key_at_least_32_characters_long";
        let token = generate_token(7, "reader@example.com".to_string(), secret, 24).unwrap();
        let claims = validate_token(&token, secret).unwrap();
        let auth_user = AuthUser::try_from(claims).unwrap();
        assert_eq!(auth_user.user_id, 7);
        assert_eq!(auth_user.email, "reader@example.com");
    }
}
