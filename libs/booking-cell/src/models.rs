use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_database::DbError;
use shared_models::error::AppError;
use shared_utils::validation::Validate;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum AttentionStatus {
    #[serde(alias = "agendada")]
    Scheduled,
    #[default]
    #[serde(alias = "confirmada")]
    Confirmed,
    #[serde(alias = "espera")]
    Waiting,
    #[serde(alias = "atendida")]
    Attended,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[serde(alias = "listo")]
    Paid,
    #[default]
    #[serde(alias = "pendiente")]
    Pending,
}

impl fmt::Display for AttentionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AttentionStatus::Scheduled => "scheduled",
            AttentionStatus::Confirmed => "confirmed",
            AttentionStatus::Waiting => "waiting",
            AttentionStatus::Attended => "attended",
        };
        f.write_str(s)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Paid => f.write_str("paid"),
            PaymentStatus::Pending => f.write_str("pending"),
        }
    }
}

/// Wall-clock times travel as `HH:MM:SS`; `HH:MM` is accepted on input.
mod clock {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M:%S";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M"))
            .map_err(|_| de::Error::custom(format!("'{}' is not a valid time of day", raw)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub date: NaiveDate,
    #[serde(with = "clock")]
    pub start_time: NaiveTime,
    #[serde(with = "clock")]
    pub end_time: NaiveTime,
    pub attention_status: AttentionStatus,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub patient_id: Uuid,
    pub professional_id: Uuid,
    pub treatment_id: Uuid,
}

/// Full replacement body for create and update. Omitted statuses fall back
/// to their defaults. End before start is accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub date: NaiveDate,
    #[serde(with = "clock")]
    pub start_time: NaiveTime,
    #[serde(with = "clock")]
    pub end_time: NaiveTime,
    #[serde(default)]
    pub attention_status: AttentionStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    pub patient_id: Uuid,
    pub professional_id: Uuid,
    pub treatment_id: Uuid,
}

impl Validate for BookingRequest {
    fn validate(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Booking joined with the display fields of the records it references.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BookingDetails {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub patient_first_name: String,
    pub patient_last_name: String,
    pub professional_id: Uuid,
    pub professional_full_name: String,
    pub treatment_id: Uuid,
    pub treatment_name: String,
    pub treatment_duration_minutes: i64,
    pub date: NaiveDate,
    #[serde(with = "clock")]
    pub start_time: NaiveTime,
    #[serde(with = "clock")]
    pub end_time: NaiveTime,
    pub attention_status: AttentionStatus,
    pub payment_status: PaymentStatus,
}

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Booking not found")]
    NotFound,

    #[error("Booking references a patient, professional or treatment that does not exist")]
    UnknownReference,

    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::NotFound => AppError::NotFound(err.to_string()),
            BookingError::UnknownReference => AppError::ConstraintViolation(err.to_string()),
            BookingError::Database(e) => e.into(),
        }
    }
}
