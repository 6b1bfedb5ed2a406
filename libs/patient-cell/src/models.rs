use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_database::DbError;
use shared_models::error::AppError;
use shared_utils::validation::{require_email, require_text, Validate};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Patient {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub birth_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// Body of both create and update; an update overwrites every field,
/// so omitting an optional field clears it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientRequest {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub phone: String,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
}

impl Validate for PatientRequest {
    fn validate(&self) -> Result<(), AppError> {
        require_text("first_name", &self.first_name)?;
        require_text("last_name", &self.last_name)?;
        require_text("phone", &self.phone)?;
        if let Some(email) = &self.email {
            require_email("email", email)?;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    #[error("Patient not found")]
    NotFound,

    #[error("A patient with email {0} already exists")]
    EmailAlreadyExists(String),

    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl From<PatientError> for AppError {
    fn from(err: PatientError) -> Self {
        match err {
            PatientError::NotFound => AppError::NotFound(err.to_string()),
            PatientError::EmailAlreadyExists(_) => AppError::DuplicateEmail(err.to_string()),
            PatientError::Database(e) => e.into(),
        }
    }
}
