// libs/contact-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use shared_models::error::AppError;

/// A message left through the site's contact form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitMessageRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum ContactError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Message not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<ContactError> for AppError {
    fn from(err: ContactError) -> Self {
        match err {
            ContactError::ValidationError(msg) => AppError::ValidationError(msg),
            ContactError::NotFound => AppError::NotFound(err.to_string()),
            ContactError::DatabaseError(msg) => AppError::Database(msg),
        }
    }
}
