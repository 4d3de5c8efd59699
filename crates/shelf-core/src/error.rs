//! Error types for Shelf

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShelfError>;

#[derive(Error, Debug)]
pub enum ShelfError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: i64 },

    #[error("Email is already registered: {0}")]
    EmailTaken(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl ShelfError {
    pub fn not_found(kind: &'static str, id: i64) -> Self {
        ShelfError::NotFound { kind, id }
    }

    pub fn database(e: impl std::fmt::Display) -> Self {
        ShelfError::Database(e.to_string())
    }

    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            ShelfError::NotFound { .. } => "not_found",
            ShelfError::EmailTaken(_) => "email_taken",
            ShelfError::Validation(_) => "validation_error",
            ShelfError::Database(_) => "database_error",
        }
    }
}
