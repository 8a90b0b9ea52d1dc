//! Repository layer for database operations

pub mod books;
pub mod users;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Book, BookInput, NewUser, User},
};

/// Persistence of book records.
///
/// Every operation is a single round-trip to storage. "Not found" on
/// update/delete comes from the affected row count, not from a prior read.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Insert a book and return the id assigned by storage
    async fn create(&self, book: &BookInput) -> AppResult<i32>;

    /// All books, in the store's natural order
    async fn list(&self) -> AppResult<Vec<Book>>;

    async fn get_by_id(&self, id: i32) -> AppResult<Book>;

    /// Overwrite every mutable field of the book
    async fn update(&self, id: i32, book: &BookInput) -> AppResult<()>;

    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Persistence of user accounts
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user; a taken email yields `AppError::Conflict`
    async fn create(&self, user: &NewUser) -> AppResult<i32>;

    async fn get_by_email(&self, email: &str) -> AppResult<User>;
}

/// Postgres-backed stores sharing one connection pool
#[derive(Clone)]
pub struct Repository {
    pub books: books::BooksRepository,
    pub users: users::UsersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool),
        }
    }
}
