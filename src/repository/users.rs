//! Users repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::UserStore;
use crate::{
    error::{AppError, AppResult},
    models::{NewUser, User},
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Map a unique-constraint violation to a conflict, by driver error kind
fn map_insert_error(err: sqlx::Error) -> AppError {
    match err {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            AppError::Conflict("Email already exists".to_string())
        }
        other => AppError::Database(other),
    }
}

#[async_trait]
impl UserStore for UsersRepository {
    async fn create(&self, user: &NewUser) -> AppResult<i32> {
        // No existence pre-check: the unique index decides, so concurrent
        // registrations of one email cannot both succeed.
        sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)
    }

    async fn get_by_email(&self, email: &str) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}
