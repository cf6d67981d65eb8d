use crate::core::error::GateError;
use crate::core::state::AppState;
use crate::models::responses::ProtectedResponse;
use crate::security::apikey_gate::authorize;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct ProtectedQuery {
    #[serde(default)]
    pub apikey: Option<String>,
}

/// Smoke-test endpoint for issued keys
///
/// GET /api/protected?apikey=<key>
pub async fn protected_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ProtectedQuery>,
) -> Result<Response, GateError> {
    let identity = authorize(&state.store, params.apikey.as_deref())?;

    Ok((
        StatusCode::OK,
        Json(ProtectedResponse {
            message: "Welcome to the protected API!".to_string(),
            user: identity.username,
        }),
    )
        .into_response())
}
