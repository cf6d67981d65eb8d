use crate::core::error::ProxyError;
use crate::core::state::AppState;
use crate::models::responses::{MessageResponse, ProxyResponse};
use crate::security::apikey_gate::authorize;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Deserialize)]
pub struct CreatePaymentQuery {
    #[serde(default)]
    pub apikey: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub codeqr: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PaymentStatusQuery {
    #[serde(default)]
    pub apikey: Option<String>,
    #[serde(default)]
    pub merchant: Option<String>,
    #[serde(default)]
    pub keyorkut: Option<String>,
}

/// Create a QR payment against the gateway
///
/// GET /api/orkut/createpayment?apikey=<key>&amount=<amount>&codeqr=<code>
pub async fn create_payment_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CreatePaymentQuery>,
) -> Result<Response, ProxyError> {
    let identity = authorize(&state.store, params.apikey.as_deref())?;

    let amount = require(&params.amount, "Amount parameter")?;
    let codeqr = require(&params.codeqr, "CodeQr parameter")?;

    debug!(user = %identity.username, amount, "creating payment qr");

    let result = state.upstream.create_payment_qr(amount, codeqr).await?;

    Ok((StatusCode::OK, Json(ProxyResponse::success(result))).into_response())
}

/// Check the latest transaction for a merchant
///
/// GET /api/orkut/cekstatus?apikey=<key>&merchant=<id>&keyorkut=<key>
pub async fn payment_status_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PaymentStatusQuery>,
) -> Result<Response, ProxyError> {
    let identity = authorize(&state.store, params.apikey.as_deref())?;

    let merchant = require(&params.merchant, "Merchant parameter")?;
    let keyorkut = require(&params.keyorkut, "Keyorkut parameter")?;

    debug!(user = %identity.username, merchant, "checking payment status");

    match state.upstream.payment_status(merchant, keyorkut).await? {
        Some(transaction) => Ok((StatusCode::OK, Json(transaction)).into_response()),
        None => Ok((
            StatusCode::OK,
            Json(MessageResponse {
                message: "No transactions found.".to_string(),
            }),
        )
            .into_response()),
    }
}

fn require<'a>(
    value: &'a Option<String>,
    name: &'static str,
) -> Result<&'a str, ProxyError> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or(ProxyError::MissingParameter(name))
}
