use std::sync::LazyLock;

use regex::Regex;

use shared_models::error::AppError;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles")
});

/// Field-level checks run on a request payload after it has deserialised.
pub trait Validate {
    fn validate(&self) -> Result<(), AppError>;
}

pub fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::ValidationError(format!("{} must not be empty", field)));
    }
    Ok(())
}

pub fn require_email(field: &str, value: &str) -> Result<(), AppError> {
    if !EMAIL_RE.is_match(value) {
        return Err(AppError::ValidationError(format!("{} is not a valid email address", field)));
    }
    Ok(())
}

pub fn require_positive(field: &str, value: i64) -> Result<(), AppError> {
    if value <= 0 {
        return Err(AppError::ValidationError(format!("{} must be a positive integer", field)));
    }
    Ok(())
}
