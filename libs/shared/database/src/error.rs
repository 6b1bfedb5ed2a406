use shared_models::error::AppError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    #[error("check constraint violated: {0}")]
    CheckViolation(String),

    #[error("sqlx error: {0}")]
    Sqlx(sqlx::Error),
}

impl DbError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, DbError::UniqueViolation(_))
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            let message = db_err.message().to_string();
            if db_err.is_unique_violation() {
                return DbError::UniqueViolation(message);
            }
            if db_err.is_foreign_key_violation() {
                return DbError::ForeignKeyViolation(message);
            }
            if db_err.is_check_violation() {
                return DbError::CheckViolation(message);
            }
        }

        DbError::Sqlx(err)
    }
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation(msg) => AppError::ConstraintViolation(msg),
            DbError::ForeignKeyViolation(_) => {
                AppError::ConstraintViolation("Referenced record does not exist".to_string())
            }
            DbError::CheckViolation(msg) => AppError::ValidationError(msg),
            DbError::Sqlx(e) => AppError::Database(e.to_string()),
        }
    }
}
