//! Data models for the bookstore

pub mod book;
pub mod user;

// Re-export commonly used types
pub use book::{Book, BookInput};
pub use user::{CreateUser, LoginRequest, NewUser, SessionClaims, User};
