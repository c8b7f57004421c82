//! Genre service for business logic operations.

use crate::error::{AppError, AppResult};
use crate::models::{Genre, NewGenre, UpdateGenre};
use crate::repositories::{GenreQuery, GenreRepository, Persisted};

/// Genre service wrapping the repository with not-found mapping.
#[derive(Clone)]
pub struct GenreService {
    repo: GenreRepository,
}

impl GenreService {
    pub fn new(repo: GenreRepository) -> Self {
        Self { repo }
    }

    /// Lists live genres; returns the page of rows plus the total count.
    pub async fn list_genres(
        &self,
        query: &GenreQuery,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Genre>, i64)> {
        self.repo.list(query, offset, limit).await
    }

    /// Gets a live genre by id, or `NotFound`.
    pub async fn get_genre(&self, id: i32) -> AppResult<Genre> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound {
                entity: "genre".to_string(),
                field: "id".to_string(),
                value: id.to_string(),
            })
    }

    /// Creates a genre or restores a soft-deleted namesake.
    pub async fn create_genre(&self, new_genre: NewGenre) -> AppResult<Persisted<Genre>> {
        self.repo.create_or_restore(new_genre).await
    }

    /// Updates a live genre.
    pub async fn update_genre(&self, id: i32, changes: UpdateGenre) -> AppResult<Genre> {
        self.repo.update(id, changes).await
    }

    /// Soft-deletes a live genre.
    ///
    /// Books referencing the genre are intentionally left untouched.
    pub async fn delete_genre(&self, id: i32) -> AppResult<()> {
        self.repo.soft_delete(id).await
    }
}
