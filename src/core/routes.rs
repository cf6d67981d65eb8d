// HTTP routes configuration

use crate::core::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Peripheral pages
        .route("/", get(crate::handlers::dashboard::dashboard_handler))
        .route("/health", get(crate::handlers::health::health_handler))
        // Account endpoints (no key required)
        .route("/api/register", post(crate::handlers::register::register_handler))
        .route("/api/login", post(crate::handlers::login::login_handler))
        // Key-gated endpoints
        .route("/api/protected", get(crate::handlers::protected::protected_handler))
        .route("/api/tiktok", get(crate::handlers::tiktok::tiktok_handler))
        .route(
            "/api/orkut/createpayment",
            get(crate::handlers::orkut::create_payment_handler),
        )
        .route(
            "/api/orkut/cekstatus",
            get(crate::handlers::orkut::payment_status_handler),
        )
        // 404 fallback for all unmatched routes
        .fallback(crate::handlers::fallback::fallback_handler)
        // The API is consumed cross-origin by the register/login pages
        .layer(CorsLayer::permissive())
        .with_state(state)
}
