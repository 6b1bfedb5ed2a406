use axum::{extract::State, http::StatusCode, Extension, Json};

use shared_models::auth::User;
use shared_models::error::AppError;
use shared_models::response::CreatedResponse;
use shared_utils::extractor::{RecordId, ValidatedJson};
use shared_utils::policy::{Action, Resource};
use shared_utils::AppState;

use crate::models::{Professional, ProfessionalRequest};
use crate::services::ProfessionalService;

pub async fn list_professionals(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<Professional>>, AppError> {
    state.authorize(&user, Resource::Professionals, Action::List)?;
    Ok(Json(ProfessionalService::new(&state.db).list().await?))
}

pub async fn get_professional(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    RecordId(id): RecordId,
) -> Result<Json<Professional>, AppError> {
    state.authorize(&user, Resource::Professionals, Action::Read)?;
    Ok(Json(ProfessionalService::new(&state.db).get(id).await?))
}

pub async fn create_professional(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    ValidatedJson(request): ValidatedJson<ProfessionalRequest>,
) -> Result<CreatedResponse, AppError> {
    state.authorize(&user, Resource::Professionals, Action::Create)?;

    let id = ProfessionalService::new(&state.db).create(request).await?;
    Ok(CreatedResponse::new(id))
}

pub async fn update_professional(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    RecordId(id): RecordId,
    ValidatedJson(request): ValidatedJson<ProfessionalRequest>,
) -> Result<StatusCode, AppError> {
    state.authorize(&user, Resource::Professionals, Action::Update)?;

    ProfessionalService::new(&state.db).update(id, request).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_professional(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    RecordId(id): RecordId,
) -> Result<StatusCode, AppError> {
    state.authorize(&user, Resource::Professionals, Action::Delete)?;

    ProfessionalService::new(&state.db).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
