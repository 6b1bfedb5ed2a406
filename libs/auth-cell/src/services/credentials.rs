use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use shared_database::{Database, DbError};
use shared_models::auth::Role;

use crate::models::{CredentialError, UserAccount};
use crate::services::password::{hash_password, verify_password};

/// Digest verified against when the email is unknown, so that a miss costs
/// the same as a wrong password. Same parameters as `Argon2::default()`.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$uzTnEbZk3OV0jxTxCdCKvw$mo5L8WBPFUSZi11rprIuL1wpWIJYZMr41rGuv255+E8";

pub struct CredentialService {
    pool: SqlitePool,
}

impl CredentialService {
    pub fn new(db: &Database) -> Self {
        Self { pool: db.pool().clone() }
    }

    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<UserAccount, CredentialError> {
        let hashed_password =
            hash_password(password).map_err(|e| CredentialError::Hashing(e.to_string()))?;

        let account = UserAccount {
            id: Uuid::new_v4(),
            email: email.to_string(),
            hashed_password,
            role,
            created_at: Utc::now(),
        };

        let mut tx = self.pool.begin().await.map_err(DbError::from)?;

        let inserted = sqlx::query(
            "INSERT INTO users (id, email, hashed_password, role, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(account.id)
        .bind(&account.email)
        .bind(&account.hashed_password)
        .bind(account.role)
        .bind(account.created_at)
        .execute(&mut *tx)
        .await
        .map_err(DbError::from);

        match inserted {
            Ok(_) => {}
            Err(e) if e.is_unique_violation() => {
                warn!("Registration refused, email already in use");
                return Err(CredentialError::DuplicateEmail { email: account.email });
            }
            Err(e) => return Err(e.into()),
        }

        tx.commit().await.map_err(DbError::from)?;

        info!("Registered user {} with role {}", account.id, account.role);
        Ok(account)
    }

    /// Returns the account only when the email exists and the password
    /// matches its digest.
    #[instrument(skip(self, password))]
    pub async fn verify(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<UserAccount>, CredentialError> {
        let account = sqlx::query_as::<_, UserAccount>(
            "SELECT id, email, hashed_password, role, created_at FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::from)?;

        match account {
            Some(account) if verify_password(password, &account.hashed_password) => Ok(Some(account)),
            Some(_) => {
                debug!("Password mismatch");
                Ok(None)
            }
            None => {
                verify_password(password, DUMMY_HASH);
                debug!("Unknown email");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, user_id: Uuid) -> Result<UserAccount, CredentialError> {
        sqlx::query_as::<_, UserAccount>(
            "SELECT id, email, hashed_password, role, created_at FROM users WHERE id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::from)?
        .ok_or(CredentialError::NotFound)
    }

    #[instrument(skip(self, current_password, new_password))]
    pub async fn change_password(
        &self,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), CredentialError> {
        let mut tx = self.pool.begin().await.map_err(DbError::from)?;

        let stored: Option<String> =
            sqlx::query_scalar("SELECT hashed_password FROM users WHERE id = ?")
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(DbError::from)?;

        let stored = stored.ok_or(CredentialError::NotFound)?;
        if !verify_password(current_password, &stored) {
            return Err(CredentialError::InvalidCredential);
        }

        let hashed =
            hash_password(new_password).map_err(|e| CredentialError::Hashing(e.to_string()))?;

        sqlx::query("UPDATE users SET hashed_password = ? WHERE id = ?")
            .bind(hashed)
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(DbError::from)?;

        tx.commit().await.map_err(DbError::from)?;

        info!("Password changed for user {}", user_id);
        Ok(())
    }
}
