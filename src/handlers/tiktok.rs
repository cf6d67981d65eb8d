use crate::core::error::ProxyError;
use crate::core::state::AppState;
use crate::models::responses::ProxyResponse;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
pub struct TiktokQuery {
    #[serde(default)]
    pub apikey: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Proxied video-download lookup
///
/// GET /api/tiktok?apikey=<key>&url=<video url>
pub async fn tiktok_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TiktokQuery>,
) -> Result<Response, ProxyError> {
    let identity = crate::security::apikey_gate::authorize(&state.store, params.apikey.as_deref())?;

    let url = params
        .url
        .as_deref()
        .filter(|u| !u.is_empty())
        .ok_or(ProxyError::MissingParameter("URL"))?;

    debug!(user = %identity.username, url, "video lookup");

    // Unlike the payment routes, lookup failures are masked: the client
    // only sees a generic 500, the detail stays in the log.
    let result = match state.upstream.video_lookup(url).await {
        Ok(data) => data.ok_or(ProxyError::NoData)?,
        Err(ProxyError::Upstream(detail)) => {
            warn!(error = %detail, "video lookup failed");
            return Err(ProxyError::Internal);
        }
        Err(e) => return Err(e),
    };

    Ok((StatusCode::OK, Json(ProxyResponse::success(result))).into_response())
}
