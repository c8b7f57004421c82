//! Transaction handlers: order placement, listing, detail and statistics.
//!
//! Every route here requires a bearer token; the acting user for order
//! placement is the token's subject.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::TRANSACTION_TAG;
use crate::api::dto::{
    ApiResponse, CreateTransactionRequest, Paginated, PaginationParams, StatisticsResponse,
    TransactionCreatedResponse, TransactionDetailResponse, TransactionListQuery,
    TransactionResponse,
};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Creates transaction routes (all bearer-guarded).
pub fn transaction_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_transactions, create_transaction))
        .routes(routes!(transaction_statistics))
        .routes(routes!(get_transaction))
}

/// POST /transactions - Place an order
///
/// Validates the line items, then runs the stock check and all writes
/// (order, items, stock decrements) in one all-or-nothing database
/// transaction. No partial order can be observed: any failure rolls the
/// whole submission back.
#[utoipa::path(
    post,
    path = "/",
    tag = TRANSACTION_TAG,
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Order placed", body = TransactionCreatedResponse),
        (status = 400, description = "Empty items or insufficient stock"),
        (status = 404, description = "User or book not found")
    ),
    security(("bearerAuth" = []))
)]
async fn create_transaction(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateTransactionRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<TransactionCreatedResponse>>)> {
    let order = state
        .services
        .orders
        .create_order(auth_user.user_id, payload.into_lines())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            TransactionCreatedResponse::from(order),
            "Transaction created",
        )),
    ))
}

/// GET /transactions - List orders
#[utoipa::path(
    get,
    path = "/",
    tag = TRANSACTION_TAG,
    params(PaginationParams, TransactionListQuery),
    responses(
        (status = 200, description = "Paginated transaction listing"),
        (status = 400, description = "Malformed search id or sort specification")
    ),
    security(("bearerAuth" = []))
)]
async fn list_transactions(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(pagination): Query<PaginationParams>,
    Query(filter): Query<TransactionListQuery>,
) -> AppResult<Json<Paginated<TransactionResponse>>> {
    let params = pagination.normalize();
    let query = filter.into_query()?;

    let (orders, total) = state
        .services
        .orders
        .list_orders(&query, params.offset(), params.limit())
        .await?;

    let data = orders.into_iter().map(TransactionResponse::from).collect();
    Ok(Json(Paginated::new(data, &params, total)))
}

/// GET /transactions/statistics - Aggregate order statistics
///
/// Computed over all orders, unpaginated. An empty order set yields zero
/// counts and "N/A" genre extremes.
#[utoipa::path(
    get,
    path = "/statistics",
    tag = TRANSACTION_TAG,
    responses(
        (status = 200, description = "Order statistics", body = StatisticsResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn transaction_statistics(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<ApiResponse<StatisticsResponse>>> {
    let stats = state.services.orders.statistics().await?;
    Ok(Json(ApiResponse::ok(StatisticsResponse::from(stats))))
}

/// GET /transactions/:id - Order detail with line items
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TRANSACTION_TAG,
    params(("id" = i32, Path, description = "Transaction id")),
    responses(
        (status = 200, description = "Transaction detail", body = TransactionDetailResponse),
        (status = 404, description = "Transaction not found")
    ),
    security(("bearerAuth" = []))
)]
async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _auth: AuthUser,
) -> AppResult<Json<ApiResponse<TransactionDetailResponse>>> {
    let detail = state.services.orders.get_order(id).await?;
    Ok(Json(ApiResponse::ok(TransactionDetailResponse::from(
        detail,
    ))))
}
