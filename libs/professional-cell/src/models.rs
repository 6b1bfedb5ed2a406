use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_database::DbError;
use shared_models::error::AppError;
use shared_utils::validation::{require_text, Validate};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ProfessionalType {
    #[serde(alias = "enfermera")]
    Nurse,
    #[serde(alias = "ayudante")]
    Assistant,
}

impl fmt::Display for ProfessionalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfessionalType::Nurse => write!(f, "nurse"),
            ProfessionalType::Assistant => write!(f, "assistant"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Professional {
    pub id: Uuid,
    pub full_name: String,
    #[serde(rename = "type")]
    pub kind: ProfessionalType,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfessionalRequest {
    pub full_name: String,
    #[serde(rename = "type")]
    pub kind: ProfessionalType,
}

impl Validate for ProfessionalRequest {
    fn validate(&self) -> Result<(), AppError> {
        require_text("full_name", &self.full_name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProfessionalError {
    #[error("Professional not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl From<ProfessionalError> for AppError {
    fn from(err: ProfessionalError) -> Self {
        match err {
            ProfessionalError::NotFound => AppError::NotFound(err.to_string()),
            ProfessionalError::Database(e) => e.into(),
        }
    }
}
