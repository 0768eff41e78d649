// libs/booking-cell/src/services/admin.rs
use chrono::NaiveDate;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{Appointment, AppointmentStatus, BookingError};

/// Admin-dashboard operations on the appointments collection. These run
/// with the administrator's token so row-level security applies server
/// side.
pub struct AppointmentAdminService {
    supabase: SupabaseClient,
}

impl AppointmentAdminService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    pub async fn list(
        &self,
        date: Option<NaiveDate>,
        status: Option<AppointmentStatus>,
        auth_token: &str,
    ) -> Result<Vec<Appointment>, BookingError> {
        let mut filters = Vec::new();
        if let Some(date) = date {
            filters.push(format!("date=eq.{}", date));
        }
        if let Some(status) = status {
            filters.push(format!("status=eq.{}", status));
        }

        let mut path = "/rest/v1/appointments?".to_string();
        if !filters.is_empty() {
            path.push_str(&filters.join("&"));
            path.push('&');
        }
        path.push_str("order=date.asc,time_slot.asc");

        debug!("Listing appointments: {}", path);

        let result: Vec<Value> = self
            .supabase
            .request(Method::GET, &path, Some(auth_token), None)
            .await
            .map_err(|e| BookingError::DatabaseError(e.to_string()))?;

        result
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<Appointment>, _>>()
            .map_err(|e| BookingError::DatabaseError(format!("Failed to parse appointments: {}", e)))
    }

    pub async fn update_status(
        &self,
        appointment_id: &str,
        status: AppointmentStatus,
        auth_token: &str,
    ) -> Result<Appointment, BookingError> {
        let path = format!("/rest/v1/appointments?id=eq.{}", appointment_id);
        let update_data = json!({
            "status": status.to_string(),
        });

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Prefer",
            reqwest::header::HeaderValue::from_static("return=representation"),
        );

        let result: Vec<Value> = self
            .supabase
            .request_with_headers(
                Method::PATCH,
                &path,
                Some(auth_token),
                Some(update_data),
                Some(headers),
            )
            .await
            .map_err(|e| BookingError::DatabaseError(e.to_string()))?;

        let row = result.into_iter().next().ok_or(BookingError::NotFound)?;

        serde_json::from_value(row).map_err(|e| {
            BookingError::DatabaseError(format!("Failed to parse updated appointment: {}", e))
        })
    }

    pub async fn delete(&self, appointment_id: &str, auth_token: &str) -> Result<(), BookingError> {
        let path = format!("/rest/v1/appointments?id=eq.{}", appointment_id);

        // return=representation so the response body stays JSON
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Prefer",
            reqwest::header::HeaderValue::from_static("return=representation"),
        );

        let result: Vec<Value> = self
            .supabase
            .request_with_headers(Method::DELETE, &path, Some(auth_token), None, Some(headers))
            .await
            .map_err(|e| BookingError::DatabaseError(e.to_string()))?;

        if result.is_empty() {
            return Err(BookingError::NotFound);
        }

        debug!("Appointment {} deleted", appointment_id);
        Ok(())
    }
}
