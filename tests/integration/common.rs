//! Shared fixtures: in-memory stores and a router wired to them

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use bookstore_api::{
    api,
    config::{AppConfig, AuthConfig, DatabaseConfig, LoggingConfig, ServerConfig},
    models::{Book, BookInput, NewUser, User},
    repository::{BookStore, UserStore},
    services::Services,
    AppError, AppResult, AppState,
};

/// Books kept in id order, ids assigned from 1 like a serial column
#[derive(Default)]
pub struct InMemoryBookStore {
    inner: Mutex<(i32, BTreeMap<i32, Book>)>,
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    async fn create(&self, book: &BookInput) -> AppResult<i32> {
        let mut guard = self.inner.lock().unwrap();
        guard.0 += 1;
        let id = guard.0;
        guard.1.insert(id, Book::from_input(id, book.clone()));
        Ok(id)
    }

    async fn list(&self) -> AppResult<Vec<Book>> {
        Ok(self.inner.lock().unwrap().1.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        self.inner
            .lock()
            .unwrap()
            .1
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    async fn update(&self, id: i32, book: &BookInput) -> AppResult<()> {
        match self.inner.lock().unwrap().1.get_mut(&id) {
            Some(existing) => {
                *existing = Book::from_input(id, book.clone());
                Ok(())
            }
            None => Err(AppError::NotFound(format!("Book with id {} not found", id))),
        }
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        self.inner
            .lock()
            .unwrap()
            .1
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }
}

/// Users with a unique email constraint
#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, user: &NewUser) -> AppResult<i32> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Conflict("Email already exists".to_string()));
        }
        let id = users.len() as i32 + 1;
        users.push(User {
            id,
            name: user.name.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
        });
        Ok(id)
    }

    async fn get_by_email(&self, email: &str) -> AppResult<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned()
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}

/// A book store whose backend is always down
pub struct UnavailableBookStore;

#[async_trait]
impl BookStore for UnavailableBookStore {
    async fn create(&self, _: &BookInput) -> AppResult<i32> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn list(&self) -> AppResult<Vec<Book>> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn get_by_id(&self, _: i32) -> AppResult<Book> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn update(&self, _: i32, _: &BookInput) -> AppResult<()> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn delete(&self, _: i32) -> AppResult<()> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }
}

/// A book store that never answers within the request timeout
pub struct SlowBookStore;

impl SlowBookStore {
    async fn stall<T>() -> AppResult<T> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Err(AppError::Internal("stalled store woke up".to_string()))
    }
}

#[async_trait]
impl BookStore for SlowBookStore {
    async fn create(&self, _: &BookInput) -> AppResult<i32> {
        Self::stall().await
    }

    async fn list(&self) -> AppResult<Vec<Book>> {
        Self::stall().await
    }

    async fn get_by_id(&self, _: i32) -> AppResult<Book> {
        Self::stall().await
    }

    async fn update(&self, _: i32, _: &BookInput) -> AppResult<()> {
        Self::stall().await
    }

    async fn delete(&self, _: i32) -> AppResult<()> {
        Self::stall().await
    }
}

pub fn test_config() -> AppConfig {
    let mut auth = AuthConfig::with_secret("integration-test-secret");
    auth.hash_memory_kib = 1024;
    auth.hash_iterations = 1;

    AppConfig {
        server: ServerConfig::default(),
        database: DatabaseConfig {
            url: "postgres://unused".to_string(),
            max_connections: 1,
            min_connections: 0,
            acquire_timeout_secs: 1,
        },
        auth,
        logging: LoggingConfig::default(),
    }
}

pub fn app_with(books: Arc<dyn BookStore>, users: Arc<dyn UserStore>) -> Router {
    let config = test_config();
    let services = Services::new(books, users, &config.auth).unwrap();
    api::router(AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    })
}

pub fn app() -> Router {
    app_with(
        Arc::new(InMemoryBookStore::default()),
        Arc::new(InMemoryUserStore::default()),
    )
}

/// Response status, raw body and parsed JSON (Null if not JSON)
pub struct TestResponse {
    pub status: StatusCode,
    pub text: String,
    pub json: Value,
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>, token: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
    }
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = builder
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    let json = serde_json::from_str(&text).unwrap_or(Value::Null);

    TestResponse { status, text, json }
}
