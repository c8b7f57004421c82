//! Router configuration for the API.
//!
//! Centralized route registration and middleware configuration. The
//! OpenAPI document is assembled from the per-resource routers and served
//! alongside swagger-ui.

use axum::{middleware, Router};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{logging_middleware, request_id_middleware};
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Middleware is applied in reverse order of declaration (last added runs
/// first): request IDs are assigned before the logging middleware reads
/// them.
///
/// # Routes
/// - `/auth` - Registration, login, current user
/// - `/genre` - Genre catalog
/// - `/books` - Book catalog (including `/books/genre/{genre_id}`)
/// - `/transactions` - Order placement, listing, statistics
/// - `/health` - Health check
/// - `/swagger-ui` - Interactive API documentation
pub fn create_router(state: AppState) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/auth", handlers::auth::auth_routes())
        .nest("/genre", handlers::genres::genre_routes())
        .nest("/books", handlers::books::book_routes())
        .nest("/transactions", handlers::orders::transaction_routes())
        .nest("/health", handlers::health::health_routes())
        .split_for_parts();

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(CorsLayer::permissive())
        // Middleware is applied in reverse order - last added runs first
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
