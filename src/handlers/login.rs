use crate::core::error::AuthError;
use crate::core::extract::FormOrJson;
use crate::core::state::AppState;
use crate::models::responses::LoginResponse;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Log in and receive the account's API key
///
/// POST /api/login (form or JSON body: username, password)
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    FormOrJson(body): FormOrJson<LoginBody>,
) -> Result<Response, AuthError> {
    let outcome = state
        .accounts
        .login(&body.username, &body.password)
        .map_err(|e| {
            warn!(username = %body.username, error = %e, "login rejected");
            e
        })?;

    Ok((
        StatusCode::OK,
        Json(LoginResponse {
            message: "Login successful".to_string(),
            apikey: outcome.apikey,
            premium: outcome.premium,
        }),
    )
        .into_response())
}
