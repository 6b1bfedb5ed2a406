use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_database::DbError;
use shared_models::error::AppError;
use shared_utils::validation::{require_positive, require_text, Validate};

use crate::price::Price;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Treatment {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub duration_minutes: i64,
    #[sqlx(rename = "price_cents")]
    pub price: Price,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreatmentRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub duration_minutes: i64,
    pub price: Price,
}

impl Validate for TreatmentRequest {
    fn validate(&self) -> Result<(), AppError> {
        require_text("name", &self.name)?;
        require_positive("duration_minutes", self.duration_minutes)?;
        if self.price.is_negative() {
            return Err(AppError::ValidationError("price must not be negative".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TreatmentError {
    #[error("Treatment not found")]
    NotFound,

    #[error("A treatment named {0} already exists")]
    NameTaken(String),

    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl From<TreatmentError> for AppError {
    fn from(err: TreatmentError) -> Self {
        match err {
            TreatmentError::NotFound => AppError::NotFound(err.to_string()),
            TreatmentError::NameTaken(_) => AppError::ConstraintViolation(err.to_string()),
            TreatmentError::Database(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn request(duration_minutes: i64, price: &str) -> TreatmentRequest {
        TreatmentRequest {
            name: "Cleaning".to_string(),
            description: None,
            duration_minutes,
            price: price.parse().unwrap(),
        }
    }

    #[test]
    fn test_validate_duration_and_price() {
        assert!(request(30, "45.00").validate().is_ok());
        assert!(request(30, "0").validate().is_ok());
        assert_matches!(request(0, "45.00").validate(), Err(AppError::ValidationError(_)));
        assert_matches!(request(-10, "45.00").validate(), Err(AppError::ValidationError(_)));
        assert_matches!(request(30, "-0.01").validate(), Err(AppError::ValidationError(_)));
    }

    #[test]
    fn test_name_taken_is_a_conflict() {
        let err: AppError = TreatmentError::NameTaken("Cleaning".to_string()).into();
        assert_matches!(err, AppError::ConstraintViolation(msg) if msg.contains("Cleaning"));
    }
}
