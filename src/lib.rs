//! Bookstore-RS Library
//!
//! Core library modules for the bookstore REST API: genres, books, users
//! and order transactions over PostgreSQL via diesel-async.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod server;
pub mod services;
pub mod state;
pub mod utils;

pub use state::AppState;

pub fn pkg_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
