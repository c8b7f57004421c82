//! Book repository for async database operations.
//!
//! Mirrors the genre repository's soft-delete and create-or-restore
//! semantics, with a wider searchable/sortable surface.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Book, NewBook, UpdateBook};
use crate::repositories::{like_pattern, Persisted, SortOrder};
use crate::schema::books;

/// Field a book listing may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookSortField {
    Title,
    Price,
    PublicationYear,
    CreatedAt,
}

/// Validated query specification for book listings.
#[derive(Debug, Clone, Default)]
pub struct BookQuery {
    /// Case-insensitive substring match on title or writer
    pub search: Option<String>,
    /// Restrict to a single genre (used by the by-genre listing)
    pub genre_id: Option<i32>,
    /// Requested sort field; `None` keeps the stable default (id ascending)
    pub sort_by: Option<BookSortField>,
    pub order: SortOrder,
}

#[derive(Clone)]
pub struct BookRepository {
    pool: AsyncDbPool,
}

impl BookRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Lists live books matching the query, returning the page of rows and
    /// the total match count.
    pub async fn list(
        &self,
        query: &BookQuery,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Book>, i64)> {
        let mut conn = self.pool.get().await.map_err(|e| AppError::ConnectionPool {
            source: anyhow::Error::from(e),
        })?;

        let pattern = query.search.as_deref().map(like_pattern);

        let mut count_query = books::table
            .filter(books::deleted_at.is_null())
            .count()
            .into_boxed();
        let mut q = books::table.filter(books::deleted_at.is_null()).into_boxed();
        if let Some(pattern) = &pattern {
            count_query = count_query.filter(
                books::title
                    .ilike(pattern.clone())
                    .or(books::writer.ilike(pattern.clone())),
            );
            q = q.filter(
                books::title
                    .ilike(pattern.clone())
                    .or(books::writer.ilike(pattern.clone())),
            );
        }
        if let Some(genre_id) = query.genre_id {
            count_query = count_query.filter(books::genre_id.eq(genre_id));
            q = q.filter(books::genre_id.eq(genre_id));
        }

        let total: i64 = count_query.get_result(&mut conn).await?;

        q = match (query.sort_by, query.order) {
            (Some(BookSortField::Title), SortOrder::Asc) => q.order(books::title.asc()),
            (Some(BookSortField::Title), SortOrder::Desc) => q.order(books::title.desc()),
            (Some(BookSortField::Price), SortOrder::Asc) => q.order(books::price.asc()),
            (Some(BookSortField::Price), SortOrder::Desc) => q.order(books::price.desc()),
            (Some(BookSortField::PublicationYear), SortOrder::Asc) => {
                q.order(books::publication_year.asc())
            }
            (Some(BookSortField::PublicationYear), SortOrder::Desc) => {
                q.order(books::publication_year.desc())
            }
            (Some(BookSortField::CreatedAt), SortOrder::Asc) => q.order(books::created_at.asc()),
            (Some(BookSortField::CreatedAt), SortOrder::Desc) => q.order(books::created_at.desc()),
            (None, _) => q.order(books::id.asc()),
        };

        let rows = q
            .then_order_by(books::id.asc())
            .offset(offset)
            .limit(limit)
            .load::<Book>(&mut conn)
            .await?;

        Ok((rows, total))
    }

    /// Finds a live book by id.
    pub async fn find_by_id(&self, book_id: i32) -> AppResult<Option<Book>> {
        let mut conn = self.pool.get().await.map_err(|e| AppError::ConnectionPool {
            source: anyhow::Error::from(e),
        })?;

        books::table
            .filter(books::id.eq(book_id))
            .filter(books::deleted_at.is_null())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Creates a book, or restores a soft-deleted one carrying the same
    /// title.
    ///
    /// Same reconciliation as the genre repository: live title collision →
    /// `Duplicate`; soft-deleted collision → fields overwritten with the new
    /// request, `deleted_at` cleared, same id kept. The partial unique index
    /// on live titles closes the check-then-insert race, surfacing as the
    /// typed `Duplicate` outcome.
    pub async fn create_or_restore(&self, new_book: NewBook) -> AppResult<Persisted<Book>> {
        let mut conn = self.pool.get().await.map_err(|e| AppError::ConnectionPool {
            source: anyhow::Error::from(e),
        })?;

        conn.transaction::<Persisted<Book>, AppError, _>(|conn| {
            async move {
                let matches: Vec<Book> = books::table
                    .filter(books::title.eq(&new_book.title))
                    .load(conn)
                    .await?;

                if matches.iter().any(|b| !b.is_deleted()) {
                    return Err(AppError::Duplicate {
                        entity: "book".to_string(),
                        field: "title".to_string(),
                        value: new_book.title,
                    });
                }

                if let Some(dead) = matches.iter().max_by_key(|b| b.deleted_at) {
                    let restored = diesel::update(books::table.find(dead.id))
                        .set((
                            books::title.eq(&new_book.title),
                            books::writer.eq(&new_book.writer),
                            books::publisher.eq(&new_book.publisher),
                            books::description.eq(new_book.description.clone()),
                            books::publication_year.eq(new_book.publication_year),
                            books::price.eq(&new_book.price),
                            books::stock_quantity.eq(new_book.stock_quantity),
                            books::genre_id.eq(new_book.genre_id),
                            books::deleted_at.eq(None::<NaiveDateTime>),
                            books::updated_at.eq(diesel::dsl::now),
                        ))
                        .returning(Book::as_returning())
                        .get_result(conn)
                        .await?;
                    return Ok(Persisted::Restored(restored));
                }

                let created = diesel::insert_into(books::table)
                    .values(&new_book)
                    .returning(Book::as_returning())
                    .get_result(conn)
                    .await?;
                Ok(Persisted::Created(created))
            }
            .scope_boxed()
        })
        .await
    }

    /// Updates a live book, re-checking title uniqueness against every other
    /// live row.
    pub async fn update(&self, book_id: i32, changes: UpdateBook) -> AppResult<Book> {
        let mut conn = self.pool.get().await.map_err(|e| AppError::ConnectionPool {
            source: anyhow::Error::from(e),
        })?;

        conn.transaction::<Book, AppError, _>(|conn| {
            async move {
                let existing: Option<Book> = books::table
                    .filter(books::id.eq(book_id))
                    .filter(books::deleted_at.is_null())
                    .first(conn)
                    .await
                    .optional()?;
                if existing.is_none() {
                    return Err(AppError::NotFound {
                        entity: "book".to_string(),
                        field: "id".to_string(),
                        value: book_id.to_string(),
                    });
                }

                if let Some(new_title) = &changes.title {
                    let clashes: i64 = books::table
                        .filter(books::title.eq(new_title))
                        .filter(books::deleted_at.is_null())
                        .filter(books::id.ne(book_id))
                        .count()
                        .get_result(conn)
                        .await?;
                    if clashes > 0 {
                        return Err(AppError::Duplicate {
                            entity: "book".to_string(),
                            field: "title".to_string(),
                            value: new_title.clone(),
                        });
                    }
                }

                diesel::update(books::table.find(book_id))
                    .set((&changes, books::updated_at.eq(diesel::dsl::now)))
                    .returning(Book::as_returning())
                    .get_result(conn)
                    .await
                    .map_err(AppError::from)
            }
            .scope_boxed()
        })
        .await
    }

    /// Soft-deletes a live book by stamping `deleted_at`.
    ///
    /// Historical order items keep referencing the row.
    pub async fn soft_delete(&self, book_id: i32) -> AppResult<()> {
        let mut conn = self.pool.get().await.map_err(|e| AppError::ConnectionPool {
            source: anyhow::Error::from(e),
        })?;

        let affected = diesel::update(
            books::table
                .filter(books::id.eq(book_id))
                .filter(books::deleted_at.is_null()),
        )
        .set((
            books::deleted_at.eq(diesel::dsl::now),
            books::updated_at.eq(diesel::dsl::now),
        ))
        .execute(&mut conn)
        .await?;

        if affected == 0 {
            Err(AppError::NotFound {
                entity: "book".to_string(),
                field: "id".to_string(),
                value: book_id.to_string(),
            })
        } else {
            Ok(())
        }
    }
}
