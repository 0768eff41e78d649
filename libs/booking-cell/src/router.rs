// libs/booking-cell/src/router.rs
use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

/// Public booking surface, no authentication.
pub fn booking_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/availability", get(handlers::get_availability))
        .route("/", post(handlers::book_appointment))
        .with_state(state)
}

/// Admin dashboard surface, behind the JWT middleware.
pub fn admin_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(handlers::list_appointments))
        .route(
            "/{appointment_id}/status",
            patch(handlers::update_appointment_status),
        )
        .route("/{appointment_id}", delete(handlers::delete_appointment))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}
