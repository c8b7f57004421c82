//! Repository layer for data access operations.
//!
//! Provides async CRUD operations for all domain entities. Listing
//! operations take an explicit query specification (filter + sort enums)
//! built and validated by the DTO layer, so no untyped query fragments
//! reach diesel.

mod book_repo;
mod genre_repo;
mod order_repo;
mod user_repo;

pub use book_repo::{BookQuery, BookRepository, BookSortField};
pub use genre_repo::{GenreQuery, GenreRepository, GenreSortField};
pub use order_repo::{
    GenreUnits, OrderLine, OrderQuery, OrderRepository, OrderSortField, OrderWithItems,
};
pub use user_repo::UserRepository;

use crate::db::AsyncDbPool;

/// Sort direction for listing queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Outcome of a create-or-restore operation.
///
/// `Restored` means a soft-deleted row with the same unique key was
/// reactivated (same id, fields overwritten) instead of inserting a new row;
/// handlers answer 200 instead of 201 for it.
#[derive(Debug, Clone)]
pub enum Persisted<T> {
    Created(T),
    Restored(T),
}

impl<T> Persisted<T> {
    pub fn into_inner(self) -> T {
        match self {
            Persisted::Created(value) | Persisted::Restored(value) => value,
        }
    }

    pub fn is_restored(&self) -> bool {
        matches!(self, Persisted::Restored(_))
    }
}

/// Builds a case-insensitive substring pattern, escaping LIKE wildcards in
/// the user-supplied term.
pub(crate) fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// Aggregates all repositories for convenient access.
///
/// Since `AsyncDbPool` uses `Arc` internally, cloning is cheap.
#[derive(Clone)]
pub struct Repositories {
    pub users: UserRepository,
    pub genres: GenreRepository,
    pub books: BookRepository,
    pub orders: OrderRepository,
}

impl Repositories {
    /// Creates a new Repositories instance with all repositories initialized.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            genres: GenreRepository::new(pool.clone()),
            books: BookRepository::new(pool.clone()),
            orders: OrderRepository::new(pool),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("dune"), "%dune%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn persisted_reports_restore_state() {
        let created = Persisted::Created(1);
        let restored = Persisted::Restored(2);
        assert!(!created.is_restored());
        assert!(restored.is_restored());
        assert_eq!(created.into_inner(), 1);
        assert_eq!(restored.into_inner(), 2);
    }
}
