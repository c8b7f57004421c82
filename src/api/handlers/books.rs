//! Book CRUD request handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::BOOK_TAG;
use crate::api::dto::{
    ApiResponse, BookListQuery, BookResponse, CreateBookRequest, Paginated, PaginationParams,
    UpdateBookRequest,
};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Creates book routes.
///
/// Listings and lookup are public; the mutating handlers take the
/// `AuthUser` guard and therefore require a bearer token.
pub fn book_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_books, create_book))
        .routes(routes!(list_books_by_genre))
        .routes(routes!(get_book, update_book, delete_book))
}

/// GET /books - List books
#[utoipa::path(
    get,
    path = "/",
    tag = BOOK_TAG,
    params(PaginationParams, BookListQuery),
    responses(
        (status = 200, description = "Paginated book listing"),
        (status = 400, description = "Invalid sort specification")
    )
)]
async fn list_books(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
    Query(filter): Query<BookListQuery>,
) -> AppResult<Json<Paginated<BookResponse>>> {
    let params = pagination.normalize();
    let query = filter.into_query()?;

    let (books, total) = state
        .services
        .books
        .list_books(&query, params.offset(), params.limit())
        .await?;

    let data = books.into_iter().map(BookResponse::from).collect();
    Ok(Json(Paginated::new(data, &params, total)))
}

/// GET /books/genre/:genre_id - List the books of one genre
#[utoipa::path(
    get,
    path = "/genre/{genre_id}",
    tag = BOOK_TAG,
    params(
        ("genre_id" = i32, Path, description = "Genre id"),
        PaginationParams,
        BookListQuery
    ),
    responses(
        (status = 200, description = "Paginated book listing for the genre"),
        (status = 404, description = "Genre absent or soft-deleted")
    )
)]
async fn list_books_by_genre(
    State(state): State<AppState>,
    Path(genre_id): Path<i32>,
    Query(pagination): Query<PaginationParams>,
    Query(filter): Query<BookListQuery>,
) -> AppResult<Json<Paginated<BookResponse>>> {
    let params = pagination.normalize();
    let query = filter.into_query()?;

    let (books, total) = state
        .services
        .books
        .list_books_by_genre(genre_id, &query, params.offset(), params.limit())
        .await?;

    let data = books.into_iter().map(BookResponse::from).collect();
    Ok(Json(Paginated::new(data, &params, total)))
}

/// GET /books/:id - Get book by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = BOOK_TAG,
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book found", body = BookResponse),
        (status = 404, description = "Book absent or soft-deleted")
    )
)]
async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<BookResponse>>> {
    let book = state.services.books.get_book(id).await?;
    Ok(Json(ApiResponse::ok(BookResponse::from(book))))
}

/// POST /books - Create a book (or restore a soft-deleted one)
///
/// A live title collision is a 400 duplicate. A soft-deleted book with the
/// same title is restored in place: its fields are overwritten with this
/// request, `deleted_at` is cleared and the response is 200 rather than 201.
#[utoipa::path(
    post,
    path = "/",
    tag = BOOK_TAG,
    request_body = CreateBookRequest,
    responses(
        (status = 201, description = "Book created", body = BookResponse),
        (status = 200, description = "Soft-deleted book restored", body = BookResponse),
        (status = 400, description = "Validation failure or duplicate title")
    ),
    security(("bearerAuth" = []))
)]
async fn create_book(
    State(state): State<AppState>,
    _auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateBookRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<BookResponse>>)> {
    let persisted = state
        .services
        .books
        .create_book(payload.into_new_book())
        .await?;

    let (status, message) = if persisted.is_restored() {
        (StatusCode::OK, "Book restored")
    } else {
        (StatusCode::CREATED, "Book created")
    };

    Ok((
        status,
        Json(ApiResponse::with_message(
            BookResponse::from(persisted.into_inner()),
            message,
        )),
    ))
}

/// PATCH /books/:id - Update a book
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = BOOK_TAG,
    params(("id" = i32, Path, description = "Book id")),
    request_body = UpdateBookRequest,
    responses(
        (status = 200, description = "Book updated", body = BookResponse),
        (status = 400, description = "Validation failure or duplicate title"),
        (status = 404, description = "Book absent or soft-deleted")
    ),
    security(("bearerAuth" = []))
)]
async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<UpdateBookRequest>,
) -> AppResult<Json<ApiResponse<BookResponse>>> {
    let book = state
        .services
        .books
        .update_book(id, payload.into_update_book())
        .await?;
    Ok(Json(ApiResponse::with_message(
        BookResponse::from(book),
        "Book updated",
    )))
}

/// DELETE /books/:id - Soft-delete a book
///
/// Historical order items keep referencing the row.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = BOOK_TAG,
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book soft-deleted"),
        (status = 404, description = "Book absent or already deleted")
    ),
    security(("bearerAuth" = []))
)]
async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _auth: AuthUser,
) -> AppResult<Json<ApiResponse<()>>> {
    state.services.books.delete_book(id).await?;
    Ok(Json(ApiResponse::message_only("Book deleted")))
}
