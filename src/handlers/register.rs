use crate::core::error::AuthError;
use crate::core::extract::FormOrJson;
use crate::core::state::AppState;
use crate::models::responses::MessageResponse;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub premium: Option<String>,
}

/// Register a new user
///
/// POST /api/register (form or JSON body: username, password, premium)
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    FormOrJson(body): FormOrJson<RegisterBody>,
) -> Result<Response, AuthError> {
    // The premium flag arrives as a string from the form; anything other
    // than the literal "true" means a regular account.
    let premium = body.premium.as_deref() == Some("true");

    state
        .accounts
        .register(&body.username, &body.password, premium)
        .map_err(|e| {
            warn!(username = %body.username, error = %e, "registration rejected");
            e
        })?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "Registration successful".to_string(),
        }),
    )
        .into_response())
}
