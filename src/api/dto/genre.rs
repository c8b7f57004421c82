//! Genre-related DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::dto::pagination::parse_sort_order;
use crate::error::{AppError, AppResult};
use crate::models::{Genre, NewGenre, UpdateGenre};
use crate::repositories::{GenreQuery, GenreSortField};

/// Request body for creating a genre.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateGenreRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    #[schema(example = "Science Fiction", min_length = 1, max_length = 255)]
    pub name: String,
}

impl CreateGenreRequest {
    pub fn into_new_genre(self) -> NewGenre {
        NewGenre { name: self.name }
    }
}

/// Request body for updating a genre.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateGenreRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: Option<String>,
}

impl UpdateGenreRequest {
    pub fn into_update_genre(self) -> UpdateGenre {
        UpdateGenre { name: self.name }
    }
}

/// Filter/sort query parameters for the genre listing.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct GenreListQuery {
    /// Case-insensitive substring match on the name
    pub search: Option<String>,
    /// Sort field: "name" or "created_at"
    pub sort_by: Option<String>,
    /// Sort direction: "asc" (default) or "desc"
    pub order: Option<String>,
}

impl GenreListQuery {
    /// Validates the raw query strings into the typed query specification.
    pub fn into_query(self) -> AppResult<GenreQuery> {
        let sort_by = match self.sort_by.as_deref() {
            None => None,
            Some("name") => Some(GenreSortField::Name),
            Some("created_at") => Some(GenreSortField::CreatedAt),
            Some(other) => {
                return Err(AppError::Validation {
                    field: "sort_by".to_string(),
                    reason: format!(
                        "Unknown sort field '{}', expected 'name' or 'created_at'",
                        other
                    ),
                });
            }
        };

        Ok(GenreQuery {
            search: self.search.filter(|s| !s.trim().is_empty()),
            sort_by,
            order: parse_sort_order(self.order.as_deref())?,
        })
    }
}

/// Response body for genre data.
#[derive(Debug, Serialize, ToSchema)]
pub struct GenreResponse {
    pub id: i32,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Genre> for GenreResponse {
    fn from(genre: Genre) -> Self {
        Self {
            id: genre.id,
            name: genre.name,
            created_at: genre.created_at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            updated_at: genre.updated_at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::SortOrder;

    #[test]
    fn query_parses_known_sort_fields() {
        let query = GenreListQuery {
            search: Some("fic".to_string()),
            sort_by: Some("name".to_string()),
            order: Some("desc".to_string()),
        }
        .into_query()
        .unwrap();

        assert_eq!(query.search.as_deref(), Some("fic"));
        assert_eq!(query.sort_by, Some(GenreSortField::Name));
        assert_eq!(query.order, SortOrder::Desc);
    }

    #[test]
    fn query_rejects_unknown_sort_field() {
        let result = GenreListQuery {
            sort_by: Some("popularity".to_string()),
            ..Default::default()
        }
        .into_query();

        assert!(matches!(result, Err(AppError::Validation { field, .. }) if field == "sort_by"));
    }

    #[test]
    fn blank_search_is_dropped() {
        let query = GenreListQuery {
            search: Some("   ".to_string()),
            ..Default::default()
        }
        .into_query()
        .unwrap();
        assert!(query.search.is_none());
    }
}
