//! Error types for the EduFinance backend
//!
//! All errors use thiserror for structured error handling. Validation
//! errors are raised before any write happens.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Student not found: {0}")]
    StudentNotFound(String),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("A student with NIS {0} already exists")]
    DuplicateStudent(String),

    #[error("Username {0} is already taken")]
    DuplicateUsername(String),

    #[error("Image exceeds the maximum size of {max} bytes (got {actual})")]
    ImageTooLarge { max: usize, actual: usize },

    #[error("The {0} account cannot be deleted")]
    ProtectedAccount(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
