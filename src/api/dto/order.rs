//! Transaction (order) DTOs for API requests and responses.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::dto::pagination::parse_sort_order;
use crate::error::{AppError, AppResult};
use crate::models::Order;
use crate::repositories::{OrderLine, OrderQuery, OrderSortField, OrderWithItems};
use crate::services::OrderStatistics;

/// One requested line item of a transaction.
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct TransactionItemRequest {
    #[validate(range(min = 1, message = "book_id must be a positive id"))]
    #[schema(example = 1, minimum = 1)]
    pub book_id: i32,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    #[schema(example = 2, minimum = 1)]
    pub quantity: i32,
}

/// Request body for creating a transaction.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateTransactionRequest {
    #[validate(length(min = 1, message = "Transaction items cannot be empty"), nested)]
    pub items: Vec<TransactionItemRequest>,
}

impl CreateTransactionRequest {
    pub fn into_lines(self) -> Vec<OrderLine> {
        self.items
            .into_iter()
            .map(|item| OrderLine {
                book_id: item.book_id,
                quantity: item.quantity,
            })
            .collect()
    }
}

/// Filter/sort query parameters for the transaction listing.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct TransactionListQuery {
    /// Exact-match transaction id (must be numeric)
    pub search: Option<String>,
    /// Sort field: "id" or "amount"
    pub sort_by: Option<String>,
    /// Sort direction: "asc" (default) or "desc"
    pub order: Option<String>,
}

impl TransactionListQuery {
    /// Validates the raw query strings into the typed query specification.
    ///
    /// A non-numeric `search` value is a validation error rather than a
    /// silent empty result.
    pub fn into_query(self) -> AppResult<OrderQuery> {
        let id = match self.search.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<i32>().map_err(|_| AppError::Validation {
                field: "search".to_string(),
                reason: format!("'{}' is not a valid transaction id", raw),
            })?),
        };

        let sort_by = match self.sort_by.as_deref() {
            None => None,
            Some("id") => Some(OrderSortField::Id),
            Some("amount") => Some(OrderSortField::Amount),
            Some(other) => {
                return Err(AppError::Validation {
                    field: "sort_by".to_string(),
                    reason: format!("Unknown sort field '{}', expected 'id' or 'amount'", other),
                });
            }
        };

        Ok(OrderQuery {
            id,
            sort_by,
            order: parse_sort_order(self.order.as_deref())?,
        })
    }
}

/// Response body for a created transaction: the order id plus the computed
/// aggregates.
#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionCreatedResponse {
    #[schema(example = 1)]
    pub order_id: i32,
    #[schema(example = 3)]
    pub total_quantity: i32,
    #[schema(value_type = String, example = "37.50")]
    pub total_amount: BigDecimal,
}

impl From<Order> for TransactionCreatedResponse {
    fn from(order: Order) -> Self {
        Self {
            order_id: order.id,
            total_quantity: order.total_quantity,
            total_amount: order.total_amount,
        }
    }
}

/// Response row for the transaction listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionResponse {
    pub id: i32,
    pub user_id: i32,
    pub total_quantity: i32,
    #[schema(value_type = String)]
    pub total_amount: BigDecimal,
    pub created_at: String,
}

impl From<Order> for TransactionResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            total_quantity: order.total_quantity,
            total_amount: order.total_amount,
            created_at: order.created_at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        }
    }
}

/// A line item in the transaction detail, with the purchase-time price.
#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionItemResponse {
    pub book_id: i32,
    pub book_title: String,
    pub quantity: i32,
    #[schema(value_type = String)]
    pub unit_price: BigDecimal,
}

/// Response body for the transaction detail endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionDetailResponse {
    pub id: i32,
    pub user_id: i32,
    pub total_quantity: i32,
    #[schema(value_type = String)]
    pub total_amount: BigDecimal,
    pub created_at: String,
    pub items: Vec<TransactionItemResponse>,
}

impl From<OrderWithItems> for TransactionDetailResponse {
    fn from(detail: OrderWithItems) -> Self {
        let items = detail
            .items
            .into_iter()
            .map(|(item, book_title)| TransactionItemResponse {
                book_id: item.book_id,
                book_title,
                quantity: item.quantity,
                unit_price: item.unit_price,
            })
            .collect();
        let order = detail.order;
        Self {
            id: order.id,
            user_id: order.user_id,
            total_quantity: order.total_quantity,
            total_amount: order.total_amount,
            created_at: order.created_at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            items,
        }
    }
}

/// Response body for transaction statistics.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatisticsResponse {
    #[schema(example = 42)]
    pub total_transactions: i64,
    /// Average order amount, rounded to a whole amount
    #[schema(example = 25.0)]
    pub average_amount: f64,
    /// Genre with the most units sold, or "N/A" with no orders
    #[schema(example = "Fantasy")]
    pub best_selling_genre: String,
    /// Genre with the fewest units sold, or "N/A" with no orders
    #[schema(example = "Horror")]
    pub least_selling_genre: String,
}

impl From<OrderStatistics> for StatisticsResponse {
    fn from(stats: OrderStatistics) -> Self {
        Self {
            total_transactions: stats.total_transactions,
            average_amount: stats.average_amount,
            best_selling_genre: stats.best_selling_genre.unwrap_or_else(|| "N/A".to_string()),
            least_selling_genre: stats
                .least_selling_genre
                .unwrap_or_else(|| "N/A".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_items_fail_validation() {
        let request = CreateTransactionRequest { items: vec![] };
        assert!(request.validate().is_err());
    }

    #[test]
    fn zero_quantity_fails_validation() {
        let request = CreateTransactionRequest {
            items: vec![TransactionItemRequest {
                book_id: 1,
                quantity: 0,
            }],
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn valid_items_pass_validation() {
        let request = CreateTransactionRequest {
            items: vec![TransactionItemRequest {
                book_id: 1,
                quantity: 2,
            }],
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn numeric_search_becomes_exact_id_filter() {
        let query = TransactionListQuery {
            search: Some(" 17 ".to_string()),
            ..Default::default()
        }
        .into_query()
        .unwrap();
        assert_eq!(query.id, Some(17));
    }

    #[test]
    fn non_numeric_search_is_rejected() {
        let result = TransactionListQuery {
            search: Some("abc".to_string()),
            ..Default::default()
        }
        .into_query();
        assert!(matches!(result, Err(AppError::Validation { field, .. }) if field == "search"));
    }

    #[test]
    fn statistics_extremes_default_to_na() {
        let response = StatisticsResponse::from(OrderStatistics {
            total_transactions: 0,
            average_amount: 0.0,
            best_selling_genre: None,
            least_selling_genre: None,
        });
        assert_eq!(response.best_selling_genre, "N/A");
        assert_eq!(response.least_selling_genre, "N/A");
    }
}
