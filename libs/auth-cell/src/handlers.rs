use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    Extension, Form, Json,
};
use tracing::{debug, info};

use shared_models::auth::{TokenResponse, User};
use shared_models::error::AppError;
use shared_models::response::CreatedResponse;
use shared_utils::extractor::ValidatedJson;
use shared_utils::policy::{Action, Resource};
use shared_utils::AppState;

use crate::models::{ChangePasswordRequest, LoginForm, RegisterRequest, UserAccount};
use crate::services::CredentialService;

pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<CreatedResponse, AppError> {
    debug!("Registering user with role {}", request.role);

    let service = CredentialService::new(&state.db);
    let account = service
        .register(&request.email, &request.password, request.role)
        .await?;

    Ok(CreatedResponse::new(account.id))
}

pub async fn login(
    State(state): State<AppState>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Json<TokenResponse>, AppError> {
    let Form(form) = form.map_err(|rejection| AppError::ValidationError(rejection.body_text()))?;

    let service = CredentialService::new(&state.db);
    let account = service
        .verify(&form.username, &form.password)
        .await?
        .ok_or_else(|| AppError::Auth("Could not validate user".to_string()))?;

    let token = state
        .tokens
        .issue(account.id, &account.email, account.role)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    info!("Issued token for user {}", account.id);
    Ok(Json(TokenResponse::bearer(token)))
}

pub async fn get_current_user(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<UserAccount>, AppError> {
    state.authorize(&user, Resource::Account, Action::Read)?;

    let service = CredentialService::new(&state.db);
    let account = service.find_by_id(user.id).await?;

    Ok(Json(account))
}

pub async fn change_password(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> Result<StatusCode, AppError> {
    state.authorize(&user, Resource::Account, Action::Update)?;

    let service = CredentialService::new(&state.db);
    service
        .change_password(user.id, &request.password, &request.new_password)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
