// libs/settings-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;
use shared_utils::extractor::ensure_admin;

use crate::models::{ClosureDate, CreateClosureRequest};
use crate::services::closures::ClosureDateService;

#[axum::debug_handler]
pub async fn list_closures(
    State(state): State<Arc<AppConfig>>,
) -> Result<Json<Vec<ClosureDate>>, AppError> {
    let service = ClosureDateService::new(&state);
    let closures = service.list().await?;
    Ok(Json(closures))
}

#[axum::debug_handler]
pub async fn create_closure(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Json(request): Json<CreateClosureRequest>,
) -> Result<(StatusCode, Json<ClosureDate>), AppError> {
    ensure_admin(&user)?;

    let service = ClosureDateService::new(&state);
    let closure = service.create(request, auth.token()).await?;
    Ok((StatusCode::CREATED, Json(closure)))
}

#[axum::debug_handler]
pub async fn delete_closure(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Path(closure_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    ensure_admin(&user)?;

    let service = ClosureDateService::new(&state);
    service.delete(&closure_id, auth.token()).await?;
    Ok(Json(json!({ "deleted": true })))
}
