//! Genre CRUD request handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::GENRE_TAG;
use crate::api::dto::{
    ApiResponse, CreateGenreRequest, GenreListQuery, GenreResponse, Paginated, PaginationParams,
    UpdateGenreRequest,
};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Creates genre routes.
///
/// Listing and lookup are public; the mutating handlers take the `AuthUser`
/// guard and therefore require a bearer token.
pub fn genre_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_genres, create_genre))
        .routes(routes!(get_genre, update_genre, delete_genre))
}

/// GET /genre - List genres
#[utoipa::path(
    get,
    path = "/",
    tag = GENRE_TAG,
    params(PaginationParams, GenreListQuery),
    responses(
        (status = 200, description = "Paginated genre listing"),
        (status = 400, description = "Invalid sort specification")
    )
)]
async fn list_genres(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
    Query(filter): Query<GenreListQuery>,
) -> AppResult<Json<Paginated<GenreResponse>>> {
    let params = pagination.normalize();
    let query = filter.into_query()?;

    let (genres, total) = state
        .services
        .genres
        .list_genres(&query, params.offset(), params.limit())
        .await?;

    let data = genres.into_iter().map(GenreResponse::from).collect();
    Ok(Json(Paginated::new(data, &params, total)))
}

/// GET /genre/:id - Get genre by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = GENRE_TAG,
    params(("id" = i32, Path, description = "Genre id")),
    responses(
        (status = 200, description = "Genre found", body = GenreResponse),
        (status = 404, description = "Genre absent or soft-deleted")
    )
)]
async fn get_genre(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<GenreResponse>>> {
    let genre = state.services.genres.get_genre(id).await?;
    Ok(Json(ApiResponse::ok(GenreResponse::from(genre))))
}

/// POST /genre - Create a genre (or restore a soft-deleted namesake)
///
/// Returns 201 for a fresh row, 200 when a soft-deleted genre with the same
/// name was restored in place.
#[utoipa::path(
    post,
    path = "/",
    tag = GENRE_TAG,
    request_body = CreateGenreRequest,
    responses(
        (status = 201, description = "Genre created", body = GenreResponse),
        (status = 200, description = "Soft-deleted genre restored", body = GenreResponse),
        (status = 400, description = "Validation failure or duplicate name")
    ),
    security(("bearerAuth" = []))
)]
async fn create_genre(
    State(state): State<AppState>,
    _auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateGenreRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<GenreResponse>>)> {
    let persisted = state
        .services
        .genres
        .create_genre(payload.into_new_genre())
        .await?;

    let (status, message) = if persisted.is_restored() {
        (StatusCode::OK, "Genre restored")
    } else {
        (StatusCode::CREATED, "Genre created")
    };

    Ok((
        status,
        Json(ApiResponse::with_message(
            GenreResponse::from(persisted.into_inner()),
            message,
        )),
    ))
}

/// PATCH /genre/:id - Update a genre
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = GENRE_TAG,
    params(("id" = i32, Path, description = "Genre id")),
    request_body = UpdateGenreRequest,
    responses(
        (status = 200, description = "Genre updated", body = GenreResponse),
        (status = 400, description = "Validation failure or duplicate name"),
        (status = 404, description = "Genre absent or soft-deleted")
    ),
    security(("bearerAuth" = []))
)]
async fn update_genre(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<UpdateGenreRequest>,
) -> AppResult<Json<ApiResponse<GenreResponse>>> {
    let genre = state
        .services
        .genres
        .update_genre(id, payload.into_update_genre())
        .await?;
    Ok(Json(ApiResponse::with_message(
        GenreResponse::from(genre),
        "Genre updated",
    )))
}

/// DELETE /genre/:id - Soft-delete a genre
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = GENRE_TAG,
    params(("id" = i32, Path, description = "Genre id")),
    responses(
        (status = 200, description = "Genre soft-deleted"),
        (status = 404, description = "Genre absent or already deleted")
    ),
    security(("bearerAuth" = []))
)]
async fn delete_genre(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _auth: AuthUser,
) -> AppResult<Json<ApiResponse<()>>> {
    state.services.genres.delete_genre(id).await?;
    Ok(Json(ApiResponse::message_only("Genre deleted")))
}
