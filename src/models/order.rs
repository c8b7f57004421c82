use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use diesel::prelude::*;

/// Order model for reading from database
///
/// Totals are snapshotted when the order is created and never recomputed,
/// so later price changes cannot drift a historical order's amount.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Order {
    pub id: i32,
    pub user_id: i32,
    pub total_quantity: i32,
    pub total_amount: BigDecimal,
    pub created_at: NaiveDateTime,
}

/// NewOrder model for inserting new records
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::orders)]
pub struct NewOrder {
    pub user_id: i32,
    pub total_quantity: i32,
    pub total_amount: BigDecimal,
}

/// OrderItem model for reading from database
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::order_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    pub book_id: i32,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub created_at: NaiveDateTime,
}

/// NewOrderItem model for inserting new records; `unit_price` is the
/// book price at purchase time.
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::order_items)]
pub struct NewOrderItem {
    pub order_id: i32,
    pub book_id: i32,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}
