use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use shared_database::{Database, DbError};

use crate::models::{Patient, PatientError, PatientRequest};

pub struct PatientService {
    pool: SqlitePool,
}

impl PatientService {
    pub fn new(db: &Database) -> Self {
        Self { pool: db.pool().clone() }
    }

    pub async fn list(&self) -> Result<Vec<Patient>, PatientError> {
        let patients = sqlx::query_as::<_, Patient>(
            "SELECT id, first_name, last_name, email, phone, birth_date, created_at \
             FROM patients ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::from)?;

        debug!("Listed {} patients", patients.len());
        Ok(patients)
    }

    pub async fn get(&self, id: Uuid) -> Result<Patient, PatientError> {
        sqlx::query_as::<_, Patient>(
            "SELECT id, first_name, last_name, email, phone, birth_date, created_at \
             FROM patients WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::from)?
        .ok_or(PatientError::NotFound)
    }

    #[instrument(skip(self, request))]
    pub async fn create(&self, request: PatientRequest) -> Result<Uuid, PatientError> {
        let id = Uuid::new_v4();
        let mut tx = self.pool.begin().await.map_err(DbError::from)?;

        sqlx::query(
            "INSERT INTO patients (id, first_name, last_name, email, phone, birth_date, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(request.birth_date)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_err(|e| Self::classify(e, &request))?;

        tx.commit().await.map_err(DbError::from)?;

        info!("Created patient {}", id);
        Ok(id)
    }

    #[instrument(skip(self, request))]
    pub async fn update(&self, id: Uuid, request: PatientRequest) -> Result<(), PatientError> {
        let mut tx = self.pool.begin().await.map_err(DbError::from)?;

        let result = sqlx::query(
            "UPDATE patients SET first_name = ?, last_name = ?, email = ?, phone = ?, birth_date = ? \
             WHERE id = ?",
        )
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(request.birth_date)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| Self::classify(e, &request))?;

        if result.rows_affected() == 0 {
            return Err(PatientError::NotFound);
        }

        tx.commit().await.map_err(DbError::from)?;

        info!("Updated patient {}", id);
        Ok(())
    }

    /// Removes the patient together with every booking that references it.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), PatientError> {
        let mut tx = self.pool.begin().await.map_err(DbError::from)?;

        let result = sqlx::query("DELETE FROM patients WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(DbError::from)?;

        if result.rows_affected() == 0 {
            return Err(PatientError::NotFound);
        }

        tx.commit().await.map_err(DbError::from)?;

        info!("Deleted patient {}", id);
        Ok(())
    }

    fn classify(err: sqlx::Error, request: &PatientRequest) -> PatientError {
        let err = DbError::from(err);
        match (&request.email, err.is_unique_violation()) {
            (Some(email), true) => PatientError::EmailAlreadyExists(email.clone()),
            _ => err.into(),
        }
    }
}
