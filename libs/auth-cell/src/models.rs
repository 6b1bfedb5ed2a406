use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_database::DbError;
use shared_models::auth::Role;
use shared_models::error::AppError;
use shared_utils::validation::{require_email, require_text, Validate};

/// Stored staff account. The password digest never leaves the service layer.
#[derive(Clone, Serialize, sqlx::FromRow)]
pub struct UserAccount {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for UserAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserAccount")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), AppError> {
        require_email("email", &self.email)?;
        require_text("password", &self.password)
    }
}

/// OAuth2 password-grant form: the account email travels as `username`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangePasswordRequest {
    pub password: String,
    pub new_password: String,
}

impl Validate for ChangePasswordRequest {
    fn validate(&self) -> Result<(), AppError> {
        require_text("new_password", &self.new_password)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("Email {email} is already registered")]
    DuplicateEmail { email: String },

    #[error("Invalid credential")]
    InvalidCredential,

    #[error("User not found")]
    NotFound,

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl From<CredentialError> for AppError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::DuplicateEmail { .. } => AppError::DuplicateEmail(err.to_string()),
            CredentialError::InvalidCredential => {
                AppError::BadRequest("Current password is incorrect".to_string())
            }
            CredentialError::NotFound => AppError::NotFound(err.to_string()),
            CredentialError::Hashing(msg) => AppError::Internal(msg),
            CredentialError::Database(e) => e.into(),
        }
    }
}
