// libs/booking-cell/src/services/store.rs
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{
    Appointment, AppointmentDraft, AppointmentStatus, BookingError, ClosureDate,
};
use crate::services::validation::format_phone;

/// Boundary to the appointments store. The booking core needs nothing more
/// from the backing database than equality filtering on `date`/`time_slot`
/// and an insert; any keyed durable store can implement this.
///
/// No operation takes a lock or opens a transaction, so check-then-create
/// races between two concurrent bookings of the same slot can still both
/// succeed. The pre-write re-check in the wizard narrows that window, it
/// does not close it.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// True when no active appointment occupies `slot` on `date`.
    async fn is_slot_free(&self, date: NaiveDate, slot: &str) -> Result<bool, BookingError>;

    /// The subset of `candidates` with no active appointment on `date`.
    async fn free_slots(
        &self,
        date: NaiveDate,
        candidates: &[String],
    ) -> Result<Vec<String>, BookingError>;

    /// Persist the draft; the store assigns the id and creation timestamp.
    async fn create(&self, draft: &AppointmentDraft) -> Result<Appointment, BookingError>;

    /// The declared closure covering `date`, if any.
    async fn closure_on(&self, date: NaiveDate) -> Result<Option<ClosureDate>, BookingError>;
}

/// Production gateway: Supabase PostgREST over the shared client.
pub struct SupabaseBookingStore {
    supabase: SupabaseClient,
}

impl SupabaseBookingStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    fn active_filter(date: NaiveDate) -> String {
        // Cancelled appointments release their slot
        format!(
            "date=eq.{}&status=neq.{}",
            date,
            AppointmentStatus::Cancelled
        )
    }
}

#[async_trait]
impl BookingStore for SupabaseBookingStore {
    async fn is_slot_free(&self, date: NaiveDate, slot: &str) -> Result<bool, BookingError> {
        let path = format!(
            "/rest/v1/appointments?{}&time_slot=eq.{}&select=id",
            Self::active_filter(date),
            urlencoding::encode(slot),
        );

        let result: Vec<Value> = self
            .supabase
            .request(Method::GET, &path, None, None)
            .await
            .map_err(|e| BookingError::DatabaseError(e.to_string()))?;

        Ok(result.is_empty())
    }

    async fn free_slots(
        &self,
        date: NaiveDate,
        candidates: &[String],
    ) -> Result<Vec<String>, BookingError> {
        let path = format!(
            "/rest/v1/appointments?{}&select=time_slot",
            Self::active_filter(date),
        );

        let result: Vec<Value> = self
            .supabase
            .request(Method::GET, &path, None, None)
            .await
            .map_err(|e| BookingError::DatabaseError(e.to_string()))?;

        let busy: Vec<&str> = result
            .iter()
            .filter_map(|row| row["time_slot"].as_str())
            .collect();

        debug!("{} booked slot(s) on {}", busy.len(), date);

        Ok(candidates
            .iter()
            .filter(|candidate| !busy.contains(&candidate.as_str()))
            .cloned()
            .collect())
    }

    async fn create(&self, draft: &AppointmentDraft) -> Result<Appointment, BookingError> {
        let (service, date, time_slot) = match (draft.service, draft.date, &draft.time_slot) {
            (Some(service), Some(date), Some(slot)) => (service, date, slot),
            _ => {
                return Err(BookingError::ValidationError(
                    "Draft is missing service, date or time slot".to_string(),
                ))
            }
        };

        let message = draft.message.trim();
        let appointment_data = json!({
            "name": draft.name.trim(),
            "phone": format_phone(&draft.phone),
            "service": service,
            "date": date.to_string(),
            "time_slot": time_slot,
            "message": if message.is_empty() { Value::Null } else { json!(message) },
            "status": AppointmentStatus::Pending.to_string(),
            "created_at": Utc::now().to_rfc3339(),
        });

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Prefer",
            reqwest::header::HeaderValue::from_static("return=representation"),
        );

        let result: Vec<Value> = self
            .supabase
            .request_with_headers(
                Method::POST,
                "/rest/v1/appointments",
                None,
                Some(appointment_data),
                Some(headers),
            )
            .await
            .map_err(|e| BookingError::DatabaseError(e.to_string()))?;

        let row = result
            .into_iter()
            .next()
            .ok_or_else(|| BookingError::DatabaseError("Failed to create appointment".to_string()))?;

        let appointment: Appointment = serde_json::from_value(row).map_err(|e| {
            BookingError::DatabaseError(format!("Failed to parse created appointment: {}", e))
        })?;

        debug!(
            "Appointment {} created for {} at {}",
            appointment.id, appointment.date, appointment.time_slot
        );

        Ok(appointment)
    }

    async fn closure_on(&self, date: NaiveDate) -> Result<Option<ClosureDate>, BookingError> {
        let path = format!("/rest/v1/closure_dates?date=eq.{}", date);

        let result: Vec<Value> = self
            .supabase
            .request(Method::GET, &path, None, None)
            .await
            .map_err(|e| BookingError::DatabaseError(e.to_string()))?;

        match result.into_iter().next() {
            Some(row) => {
                let closure: ClosureDate = serde_json::from_value(row).map_err(|e| {
                    BookingError::DatabaseError(format!("Failed to parse closure date: {}", e))
                })?;
                Ok(Some(closure))
            }
            None => Ok(None),
        }
    }
}
