// libs/contact-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde::Deserialize;
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;
use shared_utils::extractor::ensure_admin;

use crate::models::{ContactMessage, SubmitMessageRequest};
use crate::services::messages::ContactMessageService;

#[derive(Debug, Deserialize)]
pub struct MessageListQuery {
    pub unread_only: Option<bool>,
}

#[axum::debug_handler]
pub async fn submit_message(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<SubmitMessageRequest>,
) -> Result<(StatusCode, Json<ContactMessage>), AppError> {
    let service = ContactMessageService::new(&state);
    let message = service.submit(request).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

#[axum::debug_handler]
pub async fn list_messages(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Query(params): Query<MessageListQuery>,
) -> Result<Json<Value>, AppError> {
    ensure_admin(&user)?;

    let service = ContactMessageService::new(&state);
    let messages = service
        .list(params.unread_only.unwrap_or(false), auth.token())
        .await?;

    let count = messages.len();
    Ok(Json(json!({ "messages": messages, "count": count })))
}

#[axum::debug_handler]
pub async fn mark_message_read(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Path(message_id): Path<String>,
) -> Result<Json<ContactMessage>, AppError> {
    ensure_admin(&user)?;

    let service = ContactMessageService::new(&state);
    let message = service.mark_read(&message_id, auth.token()).await?;
    Ok(Json(message))
}

#[axum::debug_handler]
pub async fn delete_message(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Path(message_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    ensure_admin(&user)?;

    let service = ContactMessageService::new(&state);
    service.delete(&message_id, auth.token()).await?;
    Ok(Json(json!({ "deleted": true })))
}
