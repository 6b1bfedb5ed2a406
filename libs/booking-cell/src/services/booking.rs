use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use shared_database::{Database, DbError};

use crate::models::{Booking, BookingDetails, BookingError, BookingRequest};

const SELECT_BOOKING: &str = "SELECT id, date, start_time, end_time, attention_status, payment_status, \
     created_at, patient_id, professional_id, treatment_id FROM bookings";

const SELECT_DETAILS: &str = r#"
SELECT
    b.id,
    p.id AS patient_id,
    p.first_name AS patient_first_name,
    p.last_name AS patient_last_name,
    pr.id AS professional_id,
    pr.full_name AS professional_full_name,
    t.id AS treatment_id,
    t.name AS treatment_name,
    t.duration_minutes AS treatment_duration_minutes,
    b.date,
    b.start_time,
    b.end_time,
    b.attention_status,
    b.payment_status
FROM bookings b
JOIN patients p ON b.patient_id = p.id
JOIN professionals pr ON b.professional_id = pr.id
JOIN treatments t ON b.treatment_id = t.id
ORDER BY b.rowid
"#;

pub struct BookingService {
    pool: SqlitePool,
}

impl BookingService {
    pub fn new(db: &Database) -> Self {
        Self { pool: db.pool().clone() }
    }

    pub async fn list(&self) -> Result<Vec<Booking>, BookingError> {
        let bookings = sqlx::query_as::<_, Booking>(&format!("{} ORDER BY rowid", SELECT_BOOKING))
            .fetch_all(&self.pool)
            .await
            .map_err(DbError::from)?;
        Ok(bookings)
    }

    /// Every booking with its patient, professional and treatment display
    /// fields. Computed on each call.
    pub async fn list_enriched(&self) -> Result<Vec<BookingDetails>, BookingError> {
        let details = sqlx::query_as::<_, BookingDetails>(SELECT_DETAILS)
            .fetch_all(&self.pool)
            .await
            .map_err(DbError::from)?;

        debug!("Listed {} enriched bookings", details.len());
        Ok(details)
    }

    pub async fn get(&self, id: Uuid) -> Result<Booking, BookingError> {
        sqlx::query_as::<_, Booking>(&format!("{} WHERE id = ?", SELECT_BOOKING))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DbError::from)?
            .ok_or(BookingError::NotFound)
    }

    /// References are not looked up beforehand; storage rejects dangling ones.
    /// Overlapping bookings for one professional are allowed.
    #[instrument(skip(self, request), fields(date = %request.date))]
    pub async fn create(&self, request: BookingRequest) -> Result<Uuid, BookingError> {
        let id = Uuid::new_v4();
        let mut tx = self.pool.begin().await.map_err(DbError::from)?;

        sqlx::query(
            "INSERT INTO bookings (id, date, start_time, end_time, attention_status, payment_status, \
             created_at, patient_id, professional_id, treatment_id) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(request.date)
        .bind(request.start_time)
        .bind(request.end_time)
        .bind(request.attention_status)
        .bind(request.payment_status)
        .bind(Utc::now())
        .bind(request.patient_id)
        .bind(request.professional_id)
        .bind(request.treatment_id)
        .execute(&mut *tx)
        .await
        .map_err(Self::classify)?;

        tx.commit().await.map_err(DbError::from)?;

        info!("Created booking {} ({}, {})", id, request.attention_status, request.payment_status);
        Ok(id)
    }

    #[instrument(skip(self, request))]
    pub async fn update(&self, id: Uuid, request: BookingRequest) -> Result<(), BookingError> {
        let mut tx = self.pool.begin().await.map_err(DbError::from)?;

        let result = sqlx::query(
            "UPDATE bookings SET date = ?, start_time = ?, end_time = ?, attention_status = ?, \
             payment_status = ?, patient_id = ?, professional_id = ?, treatment_id = ? WHERE id = ?",
        )
        .bind(request.date)
        .bind(request.start_time)
        .bind(request.end_time)
        .bind(request.attention_status)
        .bind(request.payment_status)
        .bind(request.patient_id)
        .bind(request.professional_id)
        .bind(request.treatment_id)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(Self::classify)?;

        if result.rows_affected() == 0 {
            return Err(BookingError::NotFound);
        }

        tx.commit().await.map_err(DbError::from)?;

        info!("Updated booking {}", id);
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), BookingError> {
        let mut tx = self.pool.begin().await.map_err(DbError::from)?;

        let result = sqlx::query("DELETE FROM bookings WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(DbError::from)?;

        if result.rows_affected() == 0 {
            return Err(BookingError::NotFound);
        }

        tx.commit().await.map_err(DbError::from)?;

        info!("Deleted booking {}", id);
        Ok(())
    }

    fn classify(err: sqlx::Error) -> BookingError {
        match DbError::from(err) {
            DbError::ForeignKeyViolation(detail) => {
                warn!("Booking rejected by referential integrity: {}", detail);
                BookingError::UnknownReference
            }
            other => other.into(),
        }
    }
}
