//! User registration and login service

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{CreateUser, NewUser, SessionClaims},
    repository::UserStore,
    services::{
        credentials::CredentialStore,
        sessions::{IssuedSession, SessionIssuer},
    },
};

/// The single answer for every failed login
fn invalid_credentials() -> AppError {
    AppError::Authentication("Invalid email or password".to_string())
}

#[derive(Clone)]
pub struct UsersService {
    store: Arc<dyn UserStore>,
    credentials: CredentialStore,
    sessions: SessionIssuer,
}

impl UsersService {
    pub fn new(store: Arc<dyn UserStore>, credentials: CredentialStore, sessions: SessionIssuer) -> Self {
        Self {
            store,
            credentials,
            sessions,
        }
    }

    /// Register a new user, returning its id
    pub async fn register(&self, user: CreateUser) -> AppResult<i32> {
        let CreateUser {
            name,
            email,
            password,
        } = user;

        let credentials = self.credentials.clone();
        let password_hash = run_blocking(move || credentials.hash(&password)).await?;

        let id = self
            .store
            .create(&NewUser {
                name,
                email,
                password_hash,
            })
            .await
            .inspect_err(|e| {
                if matches!(e, AppError::Conflict(_)) {
                    tracing::warn!("Registration rejected: email already exists");
                }
            })?;

        tracing::info!(user_id = id, "User registered");
        Ok(id)
    }

    /// Authenticate by email and password and issue a session token.
    ///
    /// Unknown email and wrong password produce the same error.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<IssuedSession> {
        let user = match self.store.get_by_email(email).await {
            Ok(user) => user,
            Err(AppError::NotFound(_)) => {
                let credentials = self.credentials.clone();
                let password = password.to_string();
                run_blocking(move || {
                    credentials.burn(&password);
                    Ok(())
                })
                .await?;
                return Err(invalid_credentials());
            }
            Err(e) => return Err(e),
        };

        let credentials = self.credentials.clone();
        let password = password.to_string();
        let stored_hash = user.password_hash.clone();
        let valid = run_blocking(move || credentials.verify(&password, &stored_hash)).await?;
        if !valid {
            tracing::info!(user_id = user.id, "Login rejected");
            return Err(invalid_credentials());
        }

        self.sessions.issue(user.id, &user.email)
    }

    /// Validate a presented session token
    pub fn verify_session(&self, token: &str) -> AppResult<SessionClaims> {
        self.sessions.verify(token)
    }
}

/// Run CPU-heavy hashing off the async workers
async fn run_blocking<T, F>(f: F) -> AppResult<T>
where
    F: FnOnce() -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))?
}
