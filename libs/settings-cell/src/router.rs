// libs/settings-cell/src/router.rs
use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

/// Public read of declared closures, for the booking calendar.
pub fn settings_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/closures", get(handlers::list_closures))
        .with_state(state)
}

/// Closure management, behind the JWT middleware.
pub fn admin_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/closures", post(handlers::create_closure))
        .route("/closures/{closure_id}", delete(handlers::delete_closure))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}
