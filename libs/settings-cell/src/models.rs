// libs/settings-cell/src/models.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use shared_models::error::AppError;

/// Administrator-declared non-operating day. The booking cell reads these
/// when resolving availability; this cell owns their lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosureDate {
    pub id: Uuid,
    pub date: NaiveDate,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateClosureRequest {
    pub date: NaiveDate,
    pub description: String,
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("A closure is already declared for {0}")]
    DuplicateClosure(NaiveDate),

    #[error("Closure date not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<SettingsError> for AppError {
    fn from(err: SettingsError) -> Self {
        match err {
            SettingsError::ValidationError(msg) => AppError::ValidationError(msg),
            SettingsError::DuplicateClosure(_) => AppError::Conflict(err.to_string()),
            SettingsError::NotFound => AppError::NotFound(err.to_string()),
            SettingsError::DatabaseError(msg) => AppError::Database(msg),
        }
    }
}
