//! Order repository: the only multi-statement, atomicity-sensitive data
//! access in the crate.
//!
//! Order creation validates stock and writes the order, its line items and
//! the stock decrements inside a single database transaction, re-reading
//! the affected book rows under `FOR UPDATE` so concurrent submissions for
//! the same book cannot oversell.

use std::collections::{BTreeMap, HashMap};

use bigdecimal::BigDecimal;
use diesel::dsl::{avg, count_star, sum};
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Book, NewOrder, NewOrderItem, Order, OrderItem};
use crate::repositories::SortOrder;
use crate::schema::{books, genres, order_items, orders};

/// One requested line of an order: which book, how many copies.
#[derive(Debug, Clone, Copy)]
pub struct OrderLine {
    pub book_id: i32,
    pub quantity: i32,
}

/// Field an order listing may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSortField {
    Id,
    /// The snapshotted `total_amount` column, so the sort runs in SQL
    Amount,
}

/// Validated query specification for order listings.
#[derive(Debug, Clone, Default)]
pub struct OrderQuery {
    /// Exact-match order id
    pub id: Option<i32>,
    pub sort_by: Option<OrderSortField>,
    pub order: SortOrder,
}

/// An order joined with its line items and each item's book title.
#[derive(Debug, Clone)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<(OrderItem, String)>,
}

/// Aggregate units sold per genre, used by the statistics endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreUnits {
    pub genre_id: i32,
    pub name: String,
    pub units: i64,
}

#[derive(Clone)]
pub struct OrderRepository {
    pool: AsyncDbPool,
}

impl OrderRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Creates an order with its line items and decrements stock, all inside
    /// one all-or-nothing transaction.
    ///
    /// Inside the transaction the referenced live books are loaded in one
    /// batch under `FOR UPDATE`; the stock check runs against those locked
    /// rows, so the check-then-decrement sequence cannot be raced. Unit
    /// prices are snapshotted onto the items and the totals onto the order.
    ///
    /// # Errors
    /// - `NotFound` when a referenced book is absent or soft-deleted
    /// - `BadRequest` when a requested quantity exceeds current stock
    /// - any other database failure rolls everything back
    pub async fn create_with_items(
        &self,
        user_id: i32,
        lines: Vec<OrderLine>,
    ) -> AppResult<Order> {
        let mut conn = self.pool.get().await.map_err(|e| AppError::ConnectionPool {
            source: anyhow::Error::from(e),
        })?;

        conn.transaction::<Order, AppError, _>(|conn| {
            async move {
                // Quantities per book: the same book may appear on several
                // lines, and the stock check must hold for their sum.
                let mut wanted: BTreeMap<i32, i32> = BTreeMap::new();
                for line in &lines {
                    *wanted.entry(line.book_id).or_insert(0) += line.quantity;
                }
                let book_ids: Vec<i32> = wanted.keys().copied().collect();

                let locked: Vec<Book> = books::table
                    .filter(books::id.eq_any(&book_ids))
                    .filter(books::deleted_at.is_null())
                    .for_update()
                    .load(conn)
                    .await?;
                let by_id: HashMap<i32, Book> =
                    locked.into_iter().map(|b| (b.id, b)).collect();

                for (&book_id, &quantity) in &wanted {
                    let book = by_id.get(&book_id).ok_or_else(|| AppError::NotFound {
                        entity: "book".to_string(),
                        field: "id".to_string(),
                        value: book_id.to_string(),
                    })?;
                    if quantity > book.stock_quantity {
                        return Err(AppError::BadRequest {
                            message: format!(
                                "Insufficient stock for book '{}': requested {}, available {}",
                                book.title, quantity, book.stock_quantity
                            ),
                        });
                    }
                }

                let total_quantity: i32 = lines.iter().map(|l| l.quantity).sum();
                let total_amount: BigDecimal = lines.iter().fold(
                    BigDecimal::from(0),
                    |acc, line| {
                        acc + &by_id[&line.book_id].price * BigDecimal::from(line.quantity)
                    },
                );

                let order: Order = diesel::insert_into(orders::table)
                    .values(&NewOrder {
                        user_id,
                        total_quantity,
                        total_amount,
                    })
                    .returning(Order::as_returning())
                    .get_result(conn)
                    .await?;

                let new_items: Vec<NewOrderItem> = lines
                    .iter()
                    .map(|line| NewOrderItem {
                        order_id: order.id,
                        book_id: line.book_id,
                        quantity: line.quantity,
                        unit_price: by_id[&line.book_id].price.clone(),
                    })
                    .collect();
                diesel::insert_into(order_items::table)
                    .values(&new_items)
                    .execute(conn)
                    .await?;

                for (&book_id, &quantity) in &wanted {
                    diesel::update(books::table.find(book_id))
                        .set((
                            books::stock_quantity.eq(books::stock_quantity - quantity),
                            books::updated_at.eq(diesel::dsl::now),
                        ))
                        .execute(conn)
                        .await?;
                }

                Ok(order)
            }
            .scope_boxed()
        })
        .await
    }

    /// Lists orders matching the query, returning the page of rows and the
    /// total match count.
    pub async fn list(
        &self,
        query: &OrderQuery,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Order>, i64)> {
        let mut conn = self.pool.get().await.map_err(|e| AppError::ConnectionPool {
            source: anyhow::Error::from(e),
        })?;

        let mut count_query = orders::table.count().into_boxed();
        let mut q = orders::table.into_boxed();
        if let Some(id) = query.id {
            count_query = count_query.filter(orders::id.eq(id));
            q = q.filter(orders::id.eq(id));
        }

        let total: i64 = count_query.get_result(&mut conn).await?;

        q = match (query.sort_by, query.order) {
            (Some(OrderSortField::Amount), SortOrder::Asc) => q.order(orders::total_amount.asc()),
            (Some(OrderSortField::Amount), SortOrder::Desc) => {
                q.order(orders::total_amount.desc())
            }
            (Some(OrderSortField::Id), SortOrder::Desc) => q.order(orders::id.desc()),
            (Some(OrderSortField::Id), SortOrder::Asc) | (None, _) => q.order(orders::id.asc()),
        };

        let rows = q
            .then_order_by(orders::id.asc())
            .offset(offset)
            .limit(limit)
            .load::<Order>(&mut conn)
            .await?;

        Ok((rows, total))
    }

    /// Loads an order with its line items and each referenced book's title.
    ///
    /// Soft-deleted books still resolve here; history outlives the catalog.
    pub async fn find_with_items(&self, order_id: i32) -> AppResult<Option<OrderWithItems>> {
        let mut conn = self.pool.get().await.map_err(|e| AppError::ConnectionPool {
            source: anyhow::Error::from(e),
        })?;

        let order: Option<Order> = orders::table
            .filter(orders::id.eq(order_id))
            .first(&mut conn)
            .await
            .optional()?;
        let Some(order) = order else {
            return Ok(None);
        };

        let items: Vec<(OrderItem, String)> = order_items::table
            .filter(order_items::order_id.eq(order.id))
            .inner_join(books::table)
            .select((OrderItem::as_select(), books::title))
            .order(order_items::id.asc())
            .load(&mut conn)
            .await?;

        Ok(Some(OrderWithItems { order, items }))
    }

    /// Returns `(order count, average total_amount)` over all orders.
    pub async fn count_and_average(&self) -> AppResult<(i64, Option<BigDecimal>)> {
        let mut conn = self.pool.get().await.map_err(|e| AppError::ConnectionPool {
            source: anyhow::Error::from(e),
        })?;

        orders::table
            .select((count_star(), avg(orders::total_amount)))
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Aggregates units sold per genre over all order items.
    pub async fn units_sold_by_genre(&self) -> AppResult<Vec<GenreUnits>> {
        let mut conn = self.pool.get().await.map_err(|e| AppError::ConnectionPool {
            source: anyhow::Error::from(e),
        })?;

        let rows: Vec<(i32, String, Option<i64>)> = order_items::table
            .inner_join(books::table.inner_join(genres::table))
            .group_by((genres::id, genres::name))
            .select((genres::id, genres::name, sum(order_items::quantity)))
            .load(&mut conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(genre_id, name, units)| GenreUnits {
                genre_id,
                name,
                units: units.unwrap_or(0),
            })
            .collect())
    }
}
