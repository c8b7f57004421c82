//! Book-related DTOs for API requests and responses.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::api::dto::pagination::parse_sort_order;
use crate::error::{AppError, AppResult};
use crate::models::{Book, NewBook, UpdateBook};
use crate::repositories::{BookQuery, BookSortField};

fn validate_price(price: &BigDecimal) -> Result<(), ValidationError> {
    if *price < BigDecimal::from(0) {
        return Err(ValidationError::new("price").with_message("Price cannot be negative".into()));
    }
    Ok(())
}

/// Request body for creating a book.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateBookRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    #[schema(example = "Dune", min_length = 1, max_length = 255)]
    pub title: String,
    #[validate(length(min = 1, max = 255, message = "Writer must be between 1 and 255 characters"))]
    #[schema(example = "Frank Herbert")]
    pub writer: String,
    #[validate(length(
        min = 1,
        max = 255,
        message = "Publisher must be between 1 and 255 characters"
    ))]
    #[schema(example = "Chilton Books")]
    pub publisher: String,
    pub description: Option<String>,
    #[validate(range(min = 0, max = 9999, message = "Publication year must be between 0 and 9999"))]
    #[schema(example = 1965)]
    pub publication_year: i32,
    /// Decimal price, e.g. "12.50"
    #[validate(custom(function = validate_price))]
    #[schema(value_type = String, example = "12.50")]
    pub price: BigDecimal,
    #[validate(range(min = 0, message = "Stock quantity cannot be negative"))]
    #[schema(example = 10, minimum = 0)]
    pub stock_quantity: i32,
    /// Owning genre
    #[schema(example = 1)]
    pub genre_id: i32,
}

impl CreateBookRequest {
    pub fn into_new_book(self) -> NewBook {
        NewBook {
            title: self.title,
            writer: self.writer,
            publisher: self.publisher,
            description: self.description,
            publication_year: self.publication_year,
            price: self.price,
            stock_quantity: self.stock_quantity,
            genre_id: self.genre_id,
        }
    }
}

/// Request body for updating a book (None fields are left untouched).
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateBookRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Writer must be between 1 and 255 characters"))]
    pub writer: Option<String>,
    #[validate(length(
        min = 1,
        max = 255,
        message = "Publisher must be between 1 and 255 characters"
    ))]
    pub publisher: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0, max = 9999, message = "Publication year must be between 0 and 9999"))]
    pub publication_year: Option<i32>,
    #[validate(custom(function = validate_price))]
    #[schema(value_type = Option<String>)]
    pub price: Option<BigDecimal>,
    #[validate(range(min = 0, message = "Stock quantity cannot be negative"))]
    pub stock_quantity: Option<i32>,
    pub genre_id: Option<i32>,
}

impl UpdateBookRequest {
    pub fn into_update_book(self) -> UpdateBook {
        UpdateBook {
            title: self.title,
            writer: self.writer,
            publisher: self.publisher,
            description: self.description,
            publication_year: self.publication_year,
            price: self.price,
            stock_quantity: self.stock_quantity,
            genre_id: self.genre_id,
        }
    }
}

/// Filter/sort query parameters for book listings.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct BookListQuery {
    /// Case-insensitive substring match on title or writer
    pub search: Option<String>,
    /// Sort field: "title", "price", "publication_year" or "created_at"
    pub sort_by: Option<String>,
    /// Sort direction: "asc" (default) or "desc"
    pub order: Option<String>,
}

impl BookListQuery {
    /// Validates the raw query strings into the typed query specification.
    pub fn into_query(self) -> AppResult<BookQuery> {
        let sort_by = match self.sort_by.as_deref() {
            None => None,
            Some("title") => Some(BookSortField::Title),
            Some("price") => Some(BookSortField::Price),
            Some("publication_year") => Some(BookSortField::PublicationYear),
            Some("created_at") => Some(BookSortField::CreatedAt),
            Some(other) => {
                return Err(AppError::Validation {
                    field: "sort_by".to_string(),
                    reason: format!(
                        "Unknown sort field '{}', expected one of 'title', 'price', 'publication_year', 'created_at'",
                        other
                    ),
                });
            }
        };

        Ok(BookQuery {
            search: self.search.filter(|s| !s.trim().is_empty()),
            genre_id: None,
            sort_by,
            order: parse_sort_order(self.order.as_deref())?,
        })
    }
}

/// Response body for book data.
#[derive(Debug, Serialize, ToSchema)]
pub struct BookResponse {
    pub id: i32,
    pub title: String,
    pub writer: String,
    pub publisher: String,
    pub description: Option<String>,
    pub publication_year: i32,
    #[schema(value_type = String, example = "12.50")]
    pub price: BigDecimal,
    pub stock_quantity: i32,
    pub genre_id: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            writer: book.writer,
            publisher: book.publisher,
            description: book.description,
            publication_year: book.publication_year,
            price: book.price,
            stock_quantity: book.stock_quantity,
            genre_id: book.genre_id,
            created_at: book.created_at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            updated_at: book.updated_at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn create_request_rejects_negative_price() {
        let request = CreateBookRequest {
            title: "Dune".to_string(),
            writer: "Frank Herbert".to_string(),
            publisher: "Chilton Books".to_string(),
            description: None,
            publication_year: 1965,
            price: BigDecimal::from_str("-1.00").unwrap(),
            stock_quantity: 5,
            genre_id: 1,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn create_request_accepts_zero_price() {
        let request = CreateBookRequest {
            title: "Dune".to_string(),
            writer: "Frank Herbert".to_string(),
            publisher: "Chilton Books".to_string(),
            description: None,
            publication_year: 1965,
            price: BigDecimal::from(0),
            stock_quantity: 0,
            genre_id: 1,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn query_rejects_unknown_sort_field() {
        let result = BookListQuery {
            sort_by: Some("rating".to_string()),
            ..Default::default()
        }
        .into_query();
        assert!(matches!(result, Err(AppError::Validation { field, .. }) if field == "sort_by"));
    }

    #[test]
    fn query_parses_price_sort() {
        let query = BookListQuery {
            sort_by: Some("price".to_string()),
            order: Some("desc".to_string()),
            ..Default::default()
        }
        .into_query()
        .unwrap();
        assert_eq!(query.sort_by, Some(BookSortField::Price));
    }
}
