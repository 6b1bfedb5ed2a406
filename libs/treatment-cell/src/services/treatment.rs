use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use shared_database::{Database, DbError};

use crate::models::{Treatment, TreatmentError, TreatmentRequest};

const SELECT_TREATMENT: &str =
    "SELECT id, name, description, duration_minutes, price_cents, created_at FROM treatments";

pub struct TreatmentService {
    pool: SqlitePool,
}

impl TreatmentService {
    pub fn new(db: &Database) -> Self {
        Self { pool: db.pool().clone() }
    }

    pub async fn list(&self) -> Result<Vec<Treatment>, TreatmentError> {
        let treatments = sqlx::query_as::<_, Treatment>(&format!("{} ORDER BY rowid", SELECT_TREATMENT))
            .fetch_all(&self.pool)
            .await
            .map_err(DbError::from)?;

        debug!("Listed {} treatments", treatments.len());
        Ok(treatments)
    }

    pub async fn get(&self, id: Uuid) -> Result<Treatment, TreatmentError> {
        sqlx::query_as::<_, Treatment>(&format!("{} WHERE id = ?", SELECT_TREATMENT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DbError::from)?
            .ok_or(TreatmentError::NotFound)
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(&self, request: TreatmentRequest) -> Result<Uuid, TreatmentError> {
        let id = Uuid::new_v4();
        let mut tx = self.pool.begin().await.map_err(DbError::from)?;

        sqlx::query(
            "INSERT INTO treatments (id, name, description, duration_minutes, price_cents, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(&request.name)
        .bind(&request.description)
        .bind(request.duration_minutes)
        .bind(request.price)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_err(|e| Self::classify(e, &request))?;

        tx.commit().await.map_err(DbError::from)?;

        info!("Created treatment {} priced at {}", id, request.price);
        Ok(id)
    }

    #[instrument(skip(self, request))]
    pub async fn update(&self, id: Uuid, request: TreatmentRequest) -> Result<(), TreatmentError> {
        let mut tx = self.pool.begin().await.map_err(DbError::from)?;

        let result = sqlx::query(
            "UPDATE treatments SET name = ?, description = ?, duration_minutes = ?, price_cents = ? \
             WHERE id = ?",
        )
        .bind(&request.name)
        .bind(&request.description)
        .bind(request.duration_minutes)
        .bind(request.price)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| Self::classify(e, &request))?;

        if result.rows_affected() == 0 {
            return Err(TreatmentError::NotFound);
        }

        tx.commit().await.map_err(DbError::from)?;

        info!("Updated treatment {}", id);
        Ok(())
    }

    /// Cascades to every booking of this treatment.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), TreatmentError> {
        let mut tx = self.pool.begin().await.map_err(DbError::from)?;

        let result = sqlx::query("DELETE FROM treatments WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(DbError::from)?;

        if result.rows_affected() == 0 {
            return Err(TreatmentError::NotFound);
        }

        tx.commit().await.map_err(DbError::from)?;

        info!("Deleted treatment {}", id);
        Ok(())
    }

    fn classify(err: sqlx::Error, request: &TreatmentRequest) -> TreatmentError {
        let err = DbError::from(err);
        if err.is_unique_violation() {
            TreatmentError::NameTaken(request.name.clone())
        } else {
            err.into()
        }
    }
}
