// libs/contact-cell/src/services/messages.rs
use chrono::Utc;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{ContactError, ContactMessage, SubmitMessageRequest};

pub struct ContactMessageService {
    supabase: SupabaseClient,
}

impl ContactMessageService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    /// Public intake from the contact form.
    pub async fn submit(
        &self,
        request: SubmitMessageRequest,
    ) -> Result<ContactMessage, ContactError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(ContactError::ValidationError(
                "Informe seu nome".to_string(),
            ));
        }
        if request.message.trim().is_empty() {
            return Err(ContactError::ValidationError(
                "Escreva uma mensagem".to_string(),
            ));
        }

        let message_data = json!({
            "name": name,
            "email": request.email,
            "phone": request.phone,
            "message": request.message.trim(),
            "read": false,
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
                "/rest/v1/contact_messages",
                None,
                Some(message_data),
                Some(headers),
            )
            .await
            .map_err(|e| ContactError::DatabaseError(e.to_string()))?;

        let row = result
            .into_iter()
            .next()
            .ok_or_else(|| ContactError::DatabaseError("Failed to store message".to_string()))?;

        serde_json::from_value(row)
            .map_err(|e| ContactError::DatabaseError(format!("Failed to parse message: {}", e)))
    }

    pub async fn list(
        &self,
        unread_only: bool,
        auth_token: &str,
    ) -> Result<Vec<ContactMessage>, ContactError> {
        let mut path = "/rest/v1/contact_messages?order=created_at.desc".to_string();
        if unread_only {
            path.push_str("&read=eq.false");
        }

        debug!("Listing contact messages: {}", path);

        let result: Vec<Value> = self
            .supabase
            .request(Method::GET, &path, Some(auth_token), None)
            .await
            .map_err(|e| ContactError::DatabaseError(e.to_string()))?;

        result
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<ContactMessage>, _>>()
            .map_err(|e| ContactError::DatabaseError(format!("Failed to parse messages: {}", e)))
    }

    pub async fn mark_read(
        &self,
        message_id: &str,
        auth_token: &str,
    ) -> Result<ContactMessage, ContactError> {
        let path = format!("/rest/v1/contact_messages?id=eq.{}", message_id);

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
                Some(json!({ "read": true })),
                Some(headers),
            )
            .await
            .map_err(|e| ContactError::DatabaseError(e.to_string()))?;

        let row = result.into_iter().next().ok_or(ContactError::NotFound)?;

        serde_json::from_value(row)
            .map_err(|e| ContactError::DatabaseError(format!("Failed to parse message: {}", e)))
    }

    pub async fn delete(&self, message_id: &str, auth_token: &str) -> Result<(), ContactError> {
        let path = format!("/rest/v1/contact_messages?id=eq.{}", message_id);

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Prefer",
            reqwest::header::HeaderValue::from_static("return=representation"),
        );

        let result: Vec<Value> = self
            .supabase
            .request_with_headers(Method::DELETE, &path, Some(auth_token), None, Some(headers))
            .await
            .map_err(|e| ContactError::DatabaseError(e.to_string()))?;

        if result.is_empty() {
            return Err(ContactError::NotFound);
        }

        debug!("Contact message {} deleted", message_id);
        Ok(())
    }
}
