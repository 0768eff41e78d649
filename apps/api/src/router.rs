use std::sync::Arc;

use axum::{routing::get, Router};

use shared_config::AppConfig;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "Clinic API is running!" }))
        // Public site surface
        .nest(
            "/appointments",
            booking_cell::router::booking_routes(state.clone()),
        )
        .nest(
            "/contact",
            contact_cell::router::contact_routes(state.clone()),
        )
        .nest(
            "/settings",
            settings_cell::router::settings_routes(state.clone()),
        )
        // Admin dashboard surface
        .nest(
            "/admin/appointments",
            booking_cell::router::admin_routes(state.clone()),
        )
        .nest(
            "/admin/contact",
            contact_cell::router::admin_routes(state.clone()),
        )
        .nest(
            "/admin/settings",
            settings_cell::router::admin_routes(state),
        )
}
