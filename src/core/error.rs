// Centralized error handling for the service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

use crate::models::responses::ErrorResponse;

/// Errors from the user store artifact itself.
///
/// Always surfaced to clients as a generic 500; the detail only goes to the
/// server log.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to access user store: {0}")]
    Io(#[from] std::io::Error),

    #[error("User store is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Errors from registration and login.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Username already exists")]
    DuplicateUsername,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Password hashing failed: {0}")]
    Hash(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AuthError::DuplicateUsername
            | AuthError::InvalidCredentials
            | AuthError::MissingField(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AuthError::Hash(_) | AuthError::Storage(_) => {
                tracing::error!(error = %self, "internal error during auth request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Errors from the API key gate.
#[derive(Error, Debug)]
pub enum GateError {
    #[error("Missing API key.")]
    MissingApiKey,

    #[error("Invalid API key.")]
    InvalidApiKey,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            GateError::MissingApiKey | GateError::InvalidApiKey => {
                (StatusCode::FORBIDDEN, self.to_string())
            }
            GateError::Storage(_) => {
                tracing::error!(error = %self, "internal error during api key check");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Errors from the proxied third-party endpoints.
#[derive(Error, Debug)]
pub enum ProxyError {
    #[error(transparent)]
    Gate(#[from] GateError),

    #[error("{0} is required.")]
    MissingParameter(&'static str),

    #[error("No data found.")]
    NoData,

    /// Masked 500 for routes that never expose upstream detail.
    #[error("Internal server error.")]
    Internal,

    // Upstream detail is passed through to the client on the payment
    // routes. Flagged in DESIGN.md as a leak risk.
    #[error("{0}")]
    Upstream(String),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        match self {
            ProxyError::Gate(e) => e.into_response(),
            other => {
                let message = other.to_string();
                let status = match &other {
                    ProxyError::MissingParameter(_) => StatusCode::BAD_REQUEST,
                    ProxyError::NoData => StatusCode::NOT_FOUND,
                    ProxyError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
                    _ => {
                        tracing::error!(error = %message, "upstream request failed");
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };

                (status, Json(ErrorResponse { error: message })).into_response()
            }
        }
    }
}
