use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
    Json,
};
use headers::{authorization::Bearer, Authorization, HeaderMapExt};
use serde::de::DeserializeOwned;
use tracing::debug;
use uuid::Uuid;

use shared_models::error::AppError;

use crate::state::AppState;
use crate::validation::Validate;

pub fn extract_bearer_token(headers: &HeaderMap) -> Result<String, AppError> {
    if !headers.contains_key(AUTHORIZATION) {
        return Err(AppError::Auth("Missing authorization header".to_string()));
    }

    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_string())
        .ok_or_else(|| AppError::Auth("Invalid authorization header format".to_string()))
}

/// Authorization gate. Rejects the request before any handler runs unless it
/// carries a valid, unexpired bearer token; on success the resolved `User`
/// is placed in the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer_token(request.headers())?;

    let user = state.tokens.verify(&token).map_err(|e| {
        debug!("Rejected bearer token: {}", e);
        AppError::Auth("Could not validate credentials".to_string())
    })?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// JSON body that has been deserialised and passed `Validate`. Shape errors
/// surface as `ValidationError` instead of axum's plain-text rejection.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::ValidationError(rejection.body_text()))?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Record identifier taken from the `{id}` path segment.
#[derive(Debug, Clone, Copy)]
pub struct RecordId(pub Uuid);

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::ValidationError(rejection.body_text()))?;

        Uuid::parse_str(&raw)
            .map(RecordId)
            .map_err(|_| AppError::ValidationError(format!("'{}' is not a valid identifier", raw)))
    }
}
