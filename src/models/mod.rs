mod book;
mod genre;
mod order;
mod user;

pub use book::{Book, NewBook, UpdateBook};
pub use genre::{Genre, NewGenre, UpdateGenre};
pub use order::{NewOrder, NewOrderItem, Order, OrderItem};
pub use user::{NewUser, User};
