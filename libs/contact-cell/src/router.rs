// libs/contact-cell/src/router.rs
use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

/// Public contact-form intake.
pub fn contact_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", post(handlers::submit_message))
        .with_state(state)
}

/// Admin inbox, behind the JWT middleware.
pub fn admin_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(handlers::list_messages))
        .route("/{message_id}/read", patch(handlers::mark_message_read))
        .route("/{message_id}", delete(handlers::delete_message))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}
