// libs/settings-cell/src/services/closures.rs
use chrono::Utc;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{ClosureDate, CreateClosureRequest, SettingsError};

pub struct ClosureDateService {
    supabase: SupabaseClient,
}

impl ClosureDateService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    /// All declared closures, soonest first. Readable without
    /// authentication so the booking calendar can grey the days out.
    pub async fn list(&self) -> Result<Vec<ClosureDate>, SettingsError> {
        let path = "/rest/v1/closure_dates?order=date.asc";

        let result: Vec<Value> = self
            .supabase
            .request(Method::GET, path, None, None)
            .await
            .map_err(|e| SettingsError::DatabaseError(e.to_string()))?;

        result
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<ClosureDate>, _>>()
            .map_err(|e| SettingsError::DatabaseError(format!("Failed to parse closures: {}", e)))
    }

    pub async fn create(
        &self,
        request: CreateClosureRequest,
        auth_token: &str,
    ) -> Result<ClosureDate, SettingsError> {
        let description = request.description.trim();
        if description.is_empty() {
            return Err(SettingsError::ValidationError(
                "Informe uma descrição para o fechamento".to_string(),
            ));
        }

        // One closure per date keeps the resolver's lookup unambiguous
        let existing_path = format!("/rest/v1/closure_dates?date=eq.{}&select=id", request.date);
        let existing: Vec<Value> = self
            .supabase
            .request(Method::GET, &existing_path, Some(auth_token), None)
            .await
            .map_err(|e| SettingsError::DatabaseError(e.to_string()))?;

        if !existing.is_empty() {
            return Err(SettingsError::DuplicateClosure(request.date));
        }

        let closure_data = json!({
            "date": request.date.to_string(),
            "description": description,
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
                "/rest/v1/closure_dates",
                Some(auth_token),
                Some(closure_data),
                Some(headers),
            )
            .await
            .map_err(|e| SettingsError::DatabaseError(e.to_string()))?;

        let row = result
            .into_iter()
            .next()
            .ok_or_else(|| SettingsError::DatabaseError("Failed to create closure".to_string()))?;

        let closure: ClosureDate = serde_json::from_value(row)
            .map_err(|e| SettingsError::DatabaseError(format!("Failed to parse closure: {}", e)))?;

        debug!("Closure declared for {}: {}", closure.date, closure.description);
        Ok(closure)
    }

    pub async fn delete(&self, closure_id: &str, auth_token: &str) -> Result<(), SettingsError> {
        let path = format!("/rest/v1/closure_dates?id=eq.{}", closure_id);

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Prefer",
            reqwest::header::HeaderValue::from_static("return=representation"),
        );

        let result: Vec<Value> = self
            .supabase
            .request_with_headers(Method::DELETE, &path, Some(auth_token), None, Some(headers))
            .await
            .map_err(|e| SettingsError::DatabaseError(e.to_string()))?;

        if result.is_empty() {
            return Err(SettingsError::NotFound);
        }

        debug!("Closure {} deleted", closure_id);
        Ok(())
    }
}
