// libs/booking-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::TypedHeader;
use chrono::{NaiveDate, Utc};
use headers::{authorization::Bearer, Authorization};
use serde::Deserialize;
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;
use shared_utils::extractor::ensure_admin;

use crate::models::{
    Appointment, AppointmentStatus, BookAppointmentRequest, DayAvailability, UpdateStatusRequest,
};
use crate::services::admin::AppointmentAdminService;
use crate::services::booking::BookingService;

// ==============================================================================
// QUERY PARAMETER STRUCTS
// ==============================================================================

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
    /// Admin edit path: do not count this slot as taken.
    pub exclude_slot: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AdminListQuery {
    pub date: Option<NaiveDate>,
    pub status: Option<AppointmentStatus>,
}

// ==============================================================================
// PUBLIC BOOKING HANDLERS
// ==============================================================================

/// Slot grid for one calendar date, with the closure reason when the whole
/// day is unbookable.
#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<Arc<AppConfig>>,
    Query(params): Query<AvailabilityQuery>,
) -> Result<Json<DayAvailability>, AppError> {
    let service = BookingService::new(&state);

    let day = match params.exclude_slot.as_deref() {
        Some(slot) => service.availability_excluding(params.date, slot).await?,
        None => service.availability_for(params.date).await?,
    };

    Ok(Json(day))
}

/// Validated booking submission. Runs the same pipeline as the wizard's
/// final step: field validation, date rules, pre-write slot re-check,
/// create.
#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    let service = BookingService::new(&state);
    let today = Utc::now().date_naive();

    let appointment = service.place(request, today).await?;

    Ok((StatusCode::CREATED, Json(appointment)))
}

// ==============================================================================
// ADMIN HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Query(params): Query<AdminListQuery>,
) -> Result<Json<Value>, AppError> {
    ensure_admin(&user)?;

    let service = AppointmentAdminService::new(&state);
    let appointments = service
        .list(params.date, params.status, auth.token())
        .await?;

    let count = appointments.len();
    Ok(Json(json!({
        "appointments": appointments,
        "count": count,
    })))
}

#[axum::debug_handler]
pub async fn update_appointment_status(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Path(appointment_id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Appointment>, AppError> {
    ensure_admin(&user)?;

    let service = AppointmentAdminService::new(&state);
    let appointment = service
        .update_status(&appointment_id, request.status, auth.token())
        .await?;

    Ok(Json(appointment))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    ensure_admin(&user)?;

    let service = AppointmentAdminService::new(&state);
    service.delete(&appointment_id, auth.token()).await?;

    Ok(Json(json!({ "deleted": true })))
}
