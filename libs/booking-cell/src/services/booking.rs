// libs/booking-cell/src/services/booking.rs
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use shared_config::AppConfig;

use crate::models::{
    Appointment, BookAppointmentRequest, BookingError, ClosureReason, DayAvailability,
};
use crate::services::availability::{slot_template, AvailabilityService};
use crate::services::store::{BookingStore, SupabaseBookingStore};
use crate::services::validation;

/// Stateless booking pipeline for clients that keep their own form state:
/// the same validate -> re-check -> create sequence the wizard runs, in one
/// call.
pub struct BookingService<S: BookingStore> {
    store: Arc<S>,
    resolver: AvailabilityService<S>,
}

impl BookingService<SupabaseBookingStore> {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_store(Arc::new(SupabaseBookingStore::new(config)))
    }
}

impl<S: BookingStore> BookingService<S> {
    pub fn with_store(store: Arc<S>) -> Self {
        Self {
            resolver: AvailabilityService::new(Arc::clone(&store)),
            store,
        }
    }

    pub async fn availability_for(&self, date: NaiveDate) -> Result<DayAvailability, BookingError> {
        self.resolver.resolve(date, None).await
    }

    /// Availability for the admin edit path: the appointment's own slot is
    /// not reported as taken.
    pub async fn availability_excluding(
        &self,
        date: NaiveDate,
        current_slot: &str,
    ) -> Result<DayAvailability, BookingError> {
        self.resolver.resolve(date, Some(current_slot)).await
    }

    pub async fn place(
        &self,
        request: BookAppointmentRequest,
        today: NaiveDate,
    ) -> Result<Appointment, BookingError> {
        validation::validate_name(&request.name).map_err(BookingError::ValidationError)?;
        validation::validate_phone(&request.phone).map_err(BookingError::ValidationError)?;
        validation::validate_consent(request.consent).map_err(BookingError::ValidationError)?;

        if request.date < today {
            return Err(BookingError::ValidationError(
                "Escolha uma data a partir de hoje".to_string(),
            ));
        }
        if validation::is_weekend(request.date) {
            return Err(BookingError::ClinicClosed(
                ClosureReason::Weekend.notice(),
            ));
        }
        if let Some(closure) = self.store.closure_on(request.date).await? {
            return Err(BookingError::ClinicClosed(
                ClosureReason::Closed {
                    description: closure.description,
                }
                .notice(),
            ));
        }

        if !slot_template().contains(&request.time_slot) {
            return Err(BookingError::ValidationError(
                "Escolha um horário".to_string(),
            ));
        }

        if !self.store.is_slot_free(request.date, &request.time_slot).await? {
            return Err(BookingError::SlotTaken);
        }

        let appointment = self.store.create(&request.into_draft()).await?;
        info!(
            "Appointment {} booked for {} at {}",
            appointment.id, appointment.date, appointment.time_slot
        );
        Ok(appointment)
    }
}
