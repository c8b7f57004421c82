//! Book service for business logic operations.
//!
//! Validates genre references explicitly before hitting the foreign key,
//! and exposes the by-genre listing with its 404-on-missing-genre contract.

use crate::error::{AppError, AppResult};
use crate::models::{Book, NewBook, UpdateBook};
use crate::repositories::{BookQuery, BookRepository, GenreRepository, Persisted};

#[derive(Clone)]
pub struct BookService {
    repo: BookRepository,
    genres: GenreRepository,
}

impl BookService {
    pub fn new(repo: BookRepository, genres: GenreRepository) -> Self {
        Self { repo, genres }
    }

    /// Lists live books; returns the page of rows plus the total count.
    pub async fn list_books(
        &self,
        query: &BookQuery,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Book>, i64)> {
        self.repo.list(query, offset, limit).await
    }

    /// Lists the live books of one genre; the genre itself must be live,
    /// otherwise `NotFound`.
    pub async fn list_books_by_genre(
        &self,
        genre_id: i32,
        query: &BookQuery,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Book>, i64)> {
        if self.genres.find_by_id(genre_id).await?.is_none() {
            return Err(AppError::NotFound {
                entity: "genre".to_string(),
                field: "id".to_string(),
                value: genre_id.to_string(),
            });
        }

        let scoped = BookQuery {
            genre_id: Some(genre_id),
            ..query.clone()
        };
        self.repo.list(&scoped, offset, limit).await
    }

    /// Gets a live book by id, or `NotFound`.
    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound {
                entity: "book".to_string(),
                field: "id".to_string(),
                value: id.to_string(),
            })
    }

    /// Creates a book or restores a soft-deleted one with the same title.
    pub async fn create_book(&self, new_book: NewBook) -> AppResult<Persisted<Book>> {
        self.ensure_genre(new_book.genre_id).await?;
        self.repo.create_or_restore(new_book).await
    }

    /// Updates a live book; a changed genre reference is re-validated.
    pub async fn update_book(&self, id: i32, changes: UpdateBook) -> AppResult<Book> {
        if let Some(genre_id) = changes.genre_id {
            self.ensure_genre(genre_id).await?;
        }
        self.repo.update(id, changes).await
    }

    /// Soft-deletes a live book.
    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.repo.soft_delete(id).await
    }

    async fn ensure_genre(&self, genre_id: i32) -> AppResult<()> {
        if self.genres.find_by_id(genre_id).await?.is_none() {
            return Err(AppError::Validation {
                field: "genre_id".to_string(),
                reason: format!("Genre {} does not exist", genre_id),
            });
        }
        Ok(())
    }
}
