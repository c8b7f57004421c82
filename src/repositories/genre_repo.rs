//! Genre repository for async database operations.
//!
//! All default lookups exclude soft-deleted rows; soft-deleted rows stay
//! visible to the create-or-restore reconciliation.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Genre, NewGenre, UpdateGenre};
use crate::repositories::{like_pattern, Persisted, SortOrder};
use crate::schema::genres;

/// Field a genre listing may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenreSortField {
    Name,
    CreatedAt,
}

/// Validated query specification for genre listings.
#[derive(Debug, Clone, Default)]
pub struct GenreQuery {
    /// Case-insensitive substring match on the name
    pub search: Option<String>,
    /// Requested sort field; `None` keeps the stable default (id ascending)
    pub sort_by: Option<GenreSortField>,
    pub order: SortOrder,
}

#[derive(Clone)]
pub struct GenreRepository {
    pool: AsyncDbPool,
}

impl GenreRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Lists live genres matching the query, returning the page of rows and
    /// the total match count.
    pub async fn list(
        &self,
        query: &GenreQuery,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Genre>, i64)> {
        let mut conn = self.pool.get().await.map_err(|e| AppError::ConnectionPool {
            source: anyhow::Error::from(e),
        })?;

        let pattern = query.search.as_deref().map(like_pattern);

        let mut count_query = genres::table
            .filter(genres::deleted_at.is_null())
            .count()
            .into_boxed();
        let mut q = genres::table
            .filter(genres::deleted_at.is_null())
            .into_boxed();
        if let Some(pattern) = &pattern {
            count_query = count_query.filter(genres::name.ilike(pattern.clone()));
            q = q.filter(genres::name.ilike(pattern.clone()));
        }

        let total: i64 = count_query.get_result(&mut conn).await?;

        q = match (query.sort_by, query.order) {
            (Some(GenreSortField::Name), SortOrder::Asc) => q.order(genres::name.asc()),
            (Some(GenreSortField::Name), SortOrder::Desc) => q.order(genres::name.desc()),
            (Some(GenreSortField::CreatedAt), SortOrder::Asc) => q.order(genres::created_at.asc()),
            (Some(GenreSortField::CreatedAt), SortOrder::Desc) => {
                q.order(genres::created_at.desc())
            }
            (None, _) => q.order(genres::id.asc()),
        };

        let rows = q
            .then_order_by(genres::id.asc())
            .offset(offset)
            .limit(limit)
            .load::<Genre>(&mut conn)
            .await?;

        Ok((rows, total))
    }

    /// Finds a live genre by id.
    pub async fn find_by_id(&self, genre_id: i32) -> AppResult<Option<Genre>> {
        let mut conn = self.pool.get().await.map_err(|e| AppError::ConnectionPool {
            source: anyhow::Error::from(e),
        })?;

        genres::table
            .filter(genres::id.eq(genre_id))
            .filter(genres::deleted_at.is_null())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Creates a genre, or restores a soft-deleted one carrying the same
    /// name.
    ///
    /// Runs as one transaction: a live name collision is a `Duplicate`
    /// error, a soft-deleted collision is reactivated in place (same id).
    /// A concurrent insert that slips between the check and the insert is
    /// caught by the partial unique index and surfaces as the same typed
    /// `Duplicate` outcome.
    pub async fn create_or_restore(&self, new_genre: NewGenre) -> AppResult<Persisted<Genre>> {
        let mut conn = self.pool.get().await.map_err(|e| AppError::ConnectionPool {
            source: anyhow::Error::from(e),
        })?;

        conn.transaction::<Persisted<Genre>, AppError, _>(|conn| {
            async move {
                let matches: Vec<Genre> = genres::table
                    .filter(genres::name.eq(&new_genre.name))
                    .load(conn)
                    .await?;

                if matches.iter().any(|g| !g.is_deleted()) {
                    return Err(AppError::Duplicate {
                        entity: "genre".to_string(),
                        field: "name".to_string(),
                        value: new_genre.name,
                    });
                }

                // Most recently deleted row wins when several share the name.
                if let Some(dead) = matches.iter().max_by_key(|g| g.deleted_at) {
                    let restored = diesel::update(genres::table.find(dead.id))
                        .set((
                            genres::name.eq(&new_genre.name),
                            genres::deleted_at.eq(None::<NaiveDateTime>),
                            genres::updated_at.eq(diesel::dsl::now),
                        ))
                        .returning(Genre::as_returning())
                        .get_result(conn)
                        .await?;
                    return Ok(Persisted::Restored(restored));
                }

                let created = diesel::insert_into(genres::table)
                    .values(&new_genre)
                    .returning(Genre::as_returning())
                    .get_result(conn)
                    .await?;
                Ok(Persisted::Created(created))
            }
            .scope_boxed()
        })
        .await
    }

    /// Updates a live genre, re-checking name uniqueness against every other
    /// live row.
    pub async fn update(&self, genre_id: i32, changes: UpdateGenre) -> AppResult<Genre> {
        let mut conn = self.pool.get().await.map_err(|e| AppError::ConnectionPool {
            source: anyhow::Error::from(e),
        })?;

        conn.transaction::<Genre, AppError, _>(|conn| {
            async move {
                let existing: Option<Genre> = genres::table
                    .filter(genres::id.eq(genre_id))
                    .filter(genres::deleted_at.is_null())
                    .first(conn)
                    .await
                    .optional()?;
                if existing.is_none() {
                    return Err(AppError::NotFound {
                        entity: "genre".to_string(),
                        field: "id".to_string(),
                        value: genre_id.to_string(),
                    });
                }

                if let Some(new_name) = &changes.name {
                    let clashes: i64 = genres::table
                        .filter(genres::name.eq(new_name))
                        .filter(genres::deleted_at.is_null())
                        .filter(genres::id.ne(genre_id))
                        .count()
                        .get_result(conn)
                        .await?;
                    if clashes > 0 {
                        return Err(AppError::Duplicate {
                            entity: "genre".to_string(),
                            field: "name".to_string(),
                            value: new_name.clone(),
                        });
                    }
                }

                diesel::update(genres::table.find(genre_id))
                    .set((&changes, genres::updated_at.eq(diesel::dsl::now)))
                    .returning(Genre::as_returning())
                    .get_result(conn)
                    .await
                    .map_err(AppError::from)
            }
            .scope_boxed()
        })
        .await
    }

    /// Soft-deletes a live genre by stamping `deleted_at`.
    pub async fn soft_delete(&self, genre_id: i32) -> AppResult<()> {
        let mut conn = self.pool.get().await.map_err(|e| AppError::ConnectionPool {
            source: anyhow::Error::from(e),
        })?;

        let affected = diesel::update(
            genres::table
                .filter(genres::id.eq(genre_id))
                .filter(genres::deleted_at.is_null()),
        )
        .set((
            genres::deleted_at.eq(diesel::dsl::now),
            genres::updated_at.eq(diesel::dsl::now),
        ))
        .execute(&mut conn)
        .await?;

        if affected == 0 {
            Err(AppError::NotFound {
                entity: "genre".to_string(),
                field: "id".to_string(),
                value: genre_id.to_string(),
            })
        } else {
            Ok(())
        }
    }
}
