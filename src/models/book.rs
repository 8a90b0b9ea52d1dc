//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Book record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    /// Assigned by storage on creation
    pub id: i32,
    pub title: String,
    pub author: String,
    pub description: Option<String>,
}

/// Create / full update book request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Validate, ToSchema)]
pub struct BookInput {
    #[validate(custom(function = "not_blank", message = "title is required"))]
    pub title: String,
    #[validate(custom(function = "not_blank", message = "author is required"))]
    pub author: String,
    pub description: Option<String>,
}

/// Rejects empty and whitespace-only text
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

impl Book {
    /// Build the record stored under `id` from a request payload
    pub fn from_input(id: i32, input: BookInput) -> Self {
        Self {
            id,
            title: input.title,
            author: input.author,
            description: input.description,
        }
    }
}
