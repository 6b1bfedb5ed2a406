use axum::{extract::State, http::StatusCode, Extension, Json};

use shared_models::auth::User;
use shared_models::error::AppError;
use shared_models::response::CreatedResponse;
use shared_utils::extractor::{RecordId, ValidatedJson};
use shared_utils::policy::{Action, Resource};
use shared_utils::AppState;

use crate::models::{Treatment, TreatmentRequest};
use crate::services::TreatmentService;

#[axum::debug_handler]
pub async fn list_treatments(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<Treatment>>, AppError> {
    state.authorize(&user, Resource::Treatments, Action::List)?;
    Ok(Json(TreatmentService::new(&state.db).list().await?))
}

#[axum::debug_handler]
pub async fn get_treatment(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    RecordId(id): RecordId,
) -> Result<Json<Treatment>, AppError> {
    state.authorize(&user, Resource::Treatments, Action::Read)?;
    Ok(Json(TreatmentService::new(&state.db).get(id).await?))
}

#[axum::debug_handler]
pub async fn create_treatment(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    ValidatedJson(request): ValidatedJson<TreatmentRequest>,
) -> Result<CreatedResponse, AppError> {
    state.authorize(&user, Resource::Treatments, Action::Create)?;

    let id = TreatmentService::new(&state.db).create(request).await?;
    Ok(CreatedResponse::new(id))
}

#[axum::debug_handler]
pub async fn update_treatment(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    RecordId(id): RecordId,
    ValidatedJson(request): ValidatedJson<TreatmentRequest>,
) -> Result<StatusCode, AppError> {
    state.authorize(&user, Resource::Treatments, Action::Update)?;

    TreatmentService::new(&state.db).update(id, request).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn delete_treatment(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    RecordId(id): RecordId,
) -> Result<StatusCode, AppError> {
    state.authorize(&user, Resource::Treatments, Action::Delete)?;

    TreatmentService::new(&state.db).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
