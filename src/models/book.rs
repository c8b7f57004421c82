use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use diesel::prelude::*;

/// Book model for reading from database
///
/// `stock_quantity` is kept non-negative by the order workflow (checked
/// under a row lock) and by a database check constraint as the last line.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::books)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub writer: String,
    pub publisher: String,
    pub description: Option<String>,
    pub publication_year: i32,
    pub price: BigDecimal,
    pub stock_quantity: i32,
    pub genre_id: i32,
    pub deleted_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Book {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// NewBook model for inserting new records
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::books)]
pub struct NewBook {
    pub title: String,
    pub writer: String,
    pub publisher: String,
    pub description: Option<String>,
    pub publication_year: i32,
    pub price: BigDecimal,
    pub stock_quantity: i32,
    pub genre_id: i32,
}

/// UpdateBook model for partial updates (None fields are left untouched)
#[derive(Debug, AsChangeset, Clone, Default)]
#[diesel(table_name = crate::schema::books)]
pub struct UpdateBook {
    pub title: Option<String>,
    pub writer: Option<String>,
    pub publisher: Option<String>,
    pub description: Option<String>,
    pub publication_year: Option<i32>,
    pub price: Option<BigDecimal>,
    pub stock_quantity: Option<i32>,
    pub genre_id: Option<i32>,
}
