//! Business logic services

pub mod books;
pub mod credentials;
pub mod sessions;
pub mod users;

use std::sync::Arc;

use crate::{
    config::AuthConfig,
    error::AppResult,
    repository::{BookStore, Repository, UserStore},
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BooksService,
    pub users: users::UsersService,
}

impl Services {
    /// Create all services on top of the given stores
    pub fn new(
        books: Arc<dyn BookStore>,
        users: Arc<dyn UserStore>,
        auth_config: &AuthConfig,
    ) -> AppResult<Self> {
        let credentials = credentials::CredentialStore::new(auth_config)?;
        let sessions = sessions::SessionIssuer::new(auth_config);

        Ok(Self {
            books: books::BooksService::new(books),
            users: users::UsersService::new(users, credentials, sessions),
        })
    }

    /// Create all services backed by Postgres
    pub fn with_repository(repository: Repository, auth_config: &AuthConfig) -> AppResult<Self> {
        Self::new(
            Arc::new(repository.books),
            Arc::new(repository.users),
            auth_config,
        )
    }
}
