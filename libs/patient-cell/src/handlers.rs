use axum::{extract::State, http::StatusCode, Extension, Json};

use shared_models::auth::User;
use shared_models::error::AppError;
use shared_models::response::CreatedResponse;
use shared_utils::extractor::{RecordId, ValidatedJson};
use shared_utils::policy::{Action, Resource};
use shared_utils::AppState;

use crate::models::{Patient, PatientRequest};
use crate::services::PatientService;

#[axum::debug_handler]
pub async fn list_patients(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<Patient>>, AppError> {
    state.authorize(&user, Resource::Patients, Action::List)?;

    let patients = PatientService::new(&state.db).list().await?;
    Ok(Json(patients))
}

#[axum::debug_handler]
pub async fn get_patient(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    RecordId(id): RecordId,
) -> Result<Json<Patient>, AppError> {
    state.authorize(&user, Resource::Patients, Action::Read)?;

    let patient = PatientService::new(&state.db).get(id).await?;
    Ok(Json(patient))
}

#[axum::debug_handler]
pub async fn create_patient(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    ValidatedJson(request): ValidatedJson<PatientRequest>,
) -> Result<CreatedResponse, AppError> {
    state.authorize(&user, Resource::Patients, Action::Create)?;

    let id = PatientService::new(&state.db).create(request).await?;
    Ok(CreatedResponse::new(id))
}

#[axum::debug_handler]
pub async fn update_patient(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    RecordId(id): RecordId,
    ValidatedJson(request): ValidatedJson<PatientRequest>,
) -> Result<StatusCode, AppError> {
    state.authorize(&user, Resource::Patients, Action::Update)?;

    PatientService::new(&state.db).update(id, request).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn delete_patient(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    RecordId(id): RecordId,
) -> Result<StatusCode, AppError> {
    state.authorize(&user, Resource::Patients, Action::Delete)?;

    PatientService::new(&state.db).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
