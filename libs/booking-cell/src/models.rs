// libs/booking-cell/src/models.rs
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use shared_models::error::AppError;

// ==============================================================================
// CORE BOOKING MODELS
// ==============================================================================

/// The closed set of treatments the clinic offers through the booking widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DentalService {
    Evaluation,
    Cleaning,
    Whitening,
    Restoration,
    RootCanal,
    Extraction,
    Orthodontics,
    Implant,
}

impl DentalService {
    /// Display label used by the site and stored alongside the raw value.
    pub fn label(&self) -> &'static str {
        match self {
            DentalService::Evaluation => "Avaliação",
            DentalService::Cleaning => "Limpeza",
            DentalService::Whitening => "Clareamento",
            DentalService::Restoration => "Restauração",
            DentalService::RootCanal => "Tratamento de canal",
            DentalService::Extraction => "Extração",
            DentalService::Orthodontics => "Ortodontia",
            DentalService::Implant => "Implante",
        }
    }

    pub fn all() -> &'static [DentalService] {
        &[
            DentalService::Evaluation,
            DentalService::Cleaning,
            DentalService::Whitening,
            DentalService::Restoration,
            DentalService::RootCanal,
            DentalService::Extraction,
            DentalService::Orthodontics,
            DentalService::Implant,
        ]
    }
}

impl fmt::Display for DentalService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// In-progress booking form state. Lives only for the duration of one
/// wizard session; discarded on close, persisted on successful submit.
#[derive(Debug, Clone, Default)]
pub struct AppointmentDraft {
    pub name: String,
    pub phone: String,
    pub service: Option<DentalService>,
    pub date: Option<NaiveDate>,
    pub time_slot: Option<String>,
    pub message: String,
    pub consent: bool,
}

/// One bookable hourly position on a given date. `id == time`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    pub id: String,
    pub time: String,
    pub is_available: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// A booking after it has been accepted into the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub service: DentalService,
    pub date: NaiveDate,
    pub time_slot: String,
    pub message: Option<String>,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

/// Administrator-declared non-operating day (holiday, recess). Consulted
/// read-only by the availability resolver; managed by the settings cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosureDate {
    pub id: Uuid,
    pub date: NaiveDate,
    pub description: String,
}

/// Why a whole date is unbookable, when it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClosureReason {
    Weekend,
    Closed { description: String },
}

impl ClosureReason {
    pub fn notice(&self) -> String {
        match self {
            ClosureReason::Weekend => "Não atendemos aos finais de semana".to_string(),
            ClosureReason::Closed { description } => {
                format!("Clínica fechada: {}", description)
            }
        }
    }
}

/// The resolver's answer for one calendar date.
#[derive(Debug, Clone, Serialize)]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub slots: Vec<TimeSlot>,
    pub closure: Option<ClosureReason>,
}

// ==============================================================================
// WIZARD MESSAGES AND STATE
// ==============================================================================

/// Validated form fields, used as keys for the touched set and error map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BookingField {
    Name,
    Phone,
    Service,
    Date,
    TimeSlot,
    Consent,
}

impl BookingField {
    pub fn all() -> &'static [BookingField] {
        &[
            BookingField::Name,
            BookingField::Phone,
            BookingField::Service,
            BookingField::Date,
            BookingField::TimeSlot,
            BookingField::Consent,
        ]
    }
}

/// One field update, dispatched to the wizard reducer. A tagged union
/// instead of a name-keyed dynamic handler so the compiler checks every
/// field the form can touch.
#[derive(Debug, Clone)]
pub enum FieldPatch {
    Name(String),
    Phone(String),
    Service(Option<DentalService>),
    Date(Option<NaiveDate>),
    TimeSlot(Option<String>),
    Message(String),
    Consent(bool),
}

impl FieldPatch {
    /// The validated field this patch touches. `Message` is free text and
    /// never validated.
    pub fn field(&self) -> Option<BookingField> {
        match self {
            FieldPatch::Name(_) => Some(BookingField::Name),
            FieldPatch::Phone(_) => Some(BookingField::Phone),
            FieldPatch::Service(_) => Some(BookingField::Service),
            FieldPatch::Date(_) => Some(BookingField::Date),
            FieldPatch::TimeSlot(_) => Some(BookingField::TimeSlot),
            FieldPatch::Message(_) => None,
            FieldPatch::Consent(_) => Some(BookingField::Consent),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardState {
    Contact,
    Schedule,
    Confirm,
    Submitting,
    Succeeded,
}

/// Transient user-facing notification, consumed once by the presentation
/// layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    SlotConflict,
    BackendFailure,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::SlotConflict => "Esse horário acabou de ser reservado. Escolha outro.",
            Notice::BackendFailure => "Não foi possível concluir. Tente novamente.",
        }
    }
}

// ==============================================================================
// HTTP REQUEST/RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct BookAppointmentRequest {
    pub name: String,
    pub phone: String,
    pub service: DentalService,
    pub date: NaiveDate,
    pub time_slot: String,
    pub message: Option<String>,
    pub consent: bool,
}

impl BookAppointmentRequest {
    pub fn into_draft(self) -> AppointmentDraft {
        AppointmentDraft {
            name: self.name,
            phone: self.phone,
            service: Some(self.service),
            date: Some(self.date),
            time_slot: Some(self.time_slot),
            message: self.message.unwrap_or_default(),
            consent: self.consent,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: AppointmentStatus,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Time slot is no longer available")]
    SlotTaken,

    #[error("Clinic is closed on the requested date: {0}")]
    ClinicClosed(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Appointment not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::SlotTaken => AppError::Conflict(err.to_string()),
            BookingError::ClinicClosed(_) => AppError::BadRequest(err.to_string()),
            BookingError::ValidationError(msg) => AppError::ValidationError(msg),
            BookingError::NotFound => AppError::NotFound(err.to_string()),
            BookingError::DatabaseError(msg) => AppError::Database(msg),
        }
    }
}
