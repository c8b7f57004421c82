//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories and handlers.

mod book_service;
mod genre_service;
mod order_service;
mod user_service;

pub use book_service::BookService;
pub use genre_service::GenreService;
pub use order_service::{OrderService, OrderStatistics};
pub use user_service::UserService;

use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning is cheap since underlying pools use `Arc` internally.
#[derive(Clone)]
pub struct Services {
    pub users: UserService,
    pub genres: GenreService,
    pub books: BookService,
    pub orders: OrderService,
}

impl Services {
    /// Creates a new Services instance from Repositories.
    pub fn new(repos: Repositories) -> Self {
        Self {
            users: UserService::new(repos.users.clone()),
            genres: GenreService::new(repos.genres.clone()),
            books: BookService::new(repos.books, repos.genres),
            orders: OrderService::new(repos.orders, repos.users),
        }
    }
}
