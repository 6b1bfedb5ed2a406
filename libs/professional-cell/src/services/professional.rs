use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use shared_database::{Database, DbError};

use crate::models::{Professional, ProfessionalError, ProfessionalRequest};

pub struct ProfessionalService {
    pool: SqlitePool,
}

impl ProfessionalService {
    pub fn new(db: &Database) -> Self {
        Self { pool: db.pool().clone() }
    }

    pub async fn list(&self) -> Result<Vec<Professional>, ProfessionalError> {
        let professionals = sqlx::query_as::<_, Professional>(
            "SELECT id, full_name, kind, created_at FROM professionals ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::from)?;

        debug!("Listed {} professionals", professionals.len());
        Ok(professionals)
    }

    pub async fn get(&self, id: Uuid) -> Result<Professional, ProfessionalError> {
        sqlx::query_as::<_, Professional>(
            "SELECT id, full_name, kind, created_at FROM professionals WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::from)?
        .ok_or(ProfessionalError::NotFound)
    }

    #[instrument(skip(self, request), fields(kind = %request.kind))]
    pub async fn create(&self, request: ProfessionalRequest) -> Result<Uuid, ProfessionalError> {
        let id = Uuid::new_v4();
        let mut tx = self.pool.begin().await.map_err(DbError::from)?;

        sqlx::query("INSERT INTO professionals (id, full_name, kind, created_at) VALUES (?, ?, ?, ?)")
            .bind(id)
            .bind(&request.full_name)
            .bind(request.kind)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await
            .map_err(DbError::from)?;

        tx.commit().await.map_err(DbError::from)?;

        info!("Created professional {}", id);
        Ok(id)
    }

    #[instrument(skip(self, request))]
    pub async fn update(&self, id: Uuid, request: ProfessionalRequest) -> Result<(), ProfessionalError> {
        let mut tx = self.pool.begin().await.map_err(DbError::from)?;

        let result = sqlx::query("UPDATE professionals SET full_name = ?, kind = ? WHERE id = ?")
            .bind(&request.full_name)
            .bind(request.kind)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(DbError::from)?;

        if result.rows_affected() == 0 {
            return Err(ProfessionalError::NotFound);
        }

        tx.commit().await.map_err(DbError::from)?;

        info!("Updated professional {}", id);
        Ok(())
    }

    /// Cascades to the professional's bookings.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ProfessionalError> {
        let mut tx = self.pool.begin().await.map_err(DbError::from)?;

        let result = sqlx::query("DELETE FROM professionals WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(DbError::from)?;

        if result.rows_affected() == 0 {
            return Err(ProfessionalError::NotFound);
        }

        tx.commit().await.map_err(DbError::from)?;

        info!("Deleted professional {}", id);
        Ok(())
    }
}
