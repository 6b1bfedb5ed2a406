use axum::{extract::State, http::StatusCode, Extension, Json};

use shared_models::auth::User;
use shared_models::error::AppError;
use shared_models::response::CreatedResponse;
use shared_utils::extractor::{RecordId, ValidatedJson};
use shared_utils::policy::{Action, Resource};
use shared_utils::AppState;

use crate::models::{Booking, BookingDetails, BookingRequest};
use crate::services::BookingService;

#[axum::debug_handler]
pub async fn list_bookings(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<BookingDetails>>, AppError> {
    state.authorize(&user, Resource::Bookings, Action::List)?;
    Ok(Json(BookingService::new(&state.db).list_enriched().await?))
}

#[axum::debug_handler]
pub async fn get_booking(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    RecordId(id): RecordId,
) -> Result<Json<Booking>, AppError> {
    state.authorize(&user, Resource::Bookings, Action::Read)?;
    Ok(Json(BookingService::new(&state.db).get(id).await?))
}

#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    ValidatedJson(request): ValidatedJson<BookingRequest>,
) -> Result<CreatedResponse, AppError> {
    state.authorize(&user, Resource::Bookings, Action::Create)?;

    let id = BookingService::new(&state.db).create(request).await?;
    Ok(CreatedResponse::new(id))
}

#[axum::debug_handler]
pub async fn update_booking(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    RecordId(id): RecordId,
    ValidatedJson(request): ValidatedJson<BookingRequest>,
) -> Result<StatusCode, AppError> {
    state.authorize(&user, Resource::Bookings, Action::Update)?;

    BookingService::new(&state.db).update(id, request).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn delete_booking(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    RecordId(id): RecordId,
) -> Result<StatusCode, AppError> {
    state.authorize(&user, Resource::Bookings, Action::Delete)?;

    BookingService::new(&state.db).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
