//! Book catalog service

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{Book, BookInput},
    repository::BookStore,
};

#[derive(Clone)]
pub struct BooksService {
    store: Arc<dyn BookStore>,
}

impl BooksService {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    /// Store a new book and return it with its assigned id
    pub async fn create(&self, input: BookInput) -> AppResult<Book> {
        let id = self.store.create(&input).await?;
        tracing::info!(book_id = id, "Book created");
        Ok(Book::from_input(id, input))
    }

    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.store.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        self.store.get_by_id(id).await
    }

    /// Replace every field of an existing book
    pub async fn update(&self, id: i32, input: BookInput) -> AppResult<Book> {
        self.store.update(id, &input).await?;
        Ok(Book::from_input(id, input))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.store.delete(id).await?;
        tracing::info!(book_id = id, "Book deleted");
        Ok(())
    }
}
