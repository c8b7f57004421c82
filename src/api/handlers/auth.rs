//! Authentication handlers: registration, login and the current user.

use axum::{extract::State, http::StatusCode, Json};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::AUTH_TAG;
use crate::api::dto::{ApiResponse, AuthResponse, LoginRequest, RegisterRequest, UserInfo};
use crate::api::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::User;
use crate::state::AppState;
use crate::utils::jwt::generate_token;
use crate::utils::validate::ValidatedJson;

/// Creates the authentication routes
///
/// # Routes
/// - `POST /register` - Register a new account and issue a credential
/// - `POST /login` - Authenticate and issue a credential
/// - `GET /me` - Current authenticated user (requires bearer token)
pub fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(register))
        .routes(routes!(login))
        .routes(routes!(me))
}

/// Issues a bearer token for the user.
///
/// An unconfigured server secret is a configuration failure (500), never a
/// silently unsigned token.
fn issue_token(state: &AppState, user: &User) -> AppResult<String> {
    if state.jwt_config.secret.is_empty() {
        return Err(AppError::Configuration {
            key: "jwt.secret".to_string(),
            source: anyhow::anyhow!("JWT secret is not configured"),
        });
    }

    generate_token(
        user.id,
        user.email.clone(),
        &state.jwt_config.secret,
        state.jwt_config.token_expiration,
    )
}

/// POST /auth/register - Register a new account
#[utoipa::path(
    post,
    path = "/register",
    tag = AUTH_TAG,
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = AuthResponse),
        (status = 400, description = "Validation failure or duplicate email/username")
    )
)]
async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<AuthResponse>>)> {
    let user = state
        .services
        .users
        .register(payload.username, payload.email, payload.password)
        .await?;

    let token = issue_token(&state, &user)?;
    let response = AuthResponse {
        user: UserInfo::from(user),
        token,
    };

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(response, "User registered")),
    ))
}

/// POST /auth/login - Authenticate with email and password
#[utoipa::path(
    post,
    path = "/login",
    tag = AUTH_TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<AuthResponse>>> {
    let user = state
        .services
        .users
        .authenticate(&payload.email, &payload.password)
        .await?;

    let token = issue_token(&state, &user)?;
    let response = AuthResponse {
        user: UserInfo::from(user),
        token,
    };

    Ok(Json(ApiResponse::ok(response)))
}

/// GET /auth/me - Current user information
#[utoipa::path(
    get,
    path = "/me",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Current user information", body = UserInfo),
        (status = 401, description = "Missing or invalid token")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<ApiResponse<UserInfo>>> {
    let user = state.services.users.get_user(auth_user.user_id).await?;
    Ok(Json(ApiResponse::ok(UserInfo::from(user))))
}
