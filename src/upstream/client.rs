use crate::core::config::UpstreamConfig;
use crate::core::error::ProxyError;
use anyhow::{Context, Result};
use serde_json::Value;
use std::time::Duration;

/// HTTP client for the proxied third-party services.
///
/// One client instance is created at startup and shared; endpoints and the
/// request timeout come from the `[upstream]` config section.
pub struct UpstreamClient {
    client: reqwest::Client,
    video_endpoint: String,
    payment_qr_endpoint: String,
    payment_status_endpoint: String,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            video_endpoint: config.video_endpoint.clone(),
            payment_qr_endpoint: config.payment_qr_endpoint.clone(),
            payment_status_endpoint: config.payment_status_endpoint.clone(),
        })
    }

    /// Look up downloadable media for a video URL.
    ///
    /// Returns `None` when the service answers with an empty result.
    pub async fn video_lookup(&self, url: &str) -> Result<Option<Value>, ProxyError> {
        let data = self
            .get_json(
                self.client
                    .get(&self.video_endpoint)
                    .query(&[("url", url)]),
            )
            .await?;

        if data.is_null() {
            return Ok(None);
        }
        Ok(Some(data))
    }

    /// Create a QR payment for the given amount against the gateway.
    pub async fn create_payment_qr(&self, amount: &str, codeqr: &str) -> Result<Value, ProxyError> {
        self.get_json(
            self.client
                .get(&self.payment_qr_endpoint)
                .query(&[("amount", amount), ("codeqr", codeqr)]),
        )
        .await
    }

    /// Fetch the latest transaction for a merchant, if any.
    ///
    /// The gateway returns `{ "data": [ ... ] }` ordered newest first.
    pub async fn payment_status(
        &self,
        merchant: &str,
        keyorkut: &str,
    ) -> Result<Option<Value>, ProxyError> {
        let url = format!(
            "{}/{}/{}",
            self.payment_status_endpoint.trim_end_matches('/'),
            merchant,
            keyorkut
        );

        let result = self.get_json(self.client.get(&url)).await?;

        let latest = result
            .get("data")
            .and_then(|d| d.as_array())
            .and_then(|transactions| transactions.first())
            .cloned();

        Ok(latest)
    }

    async fn get_json(&self, request: reqwest::RequestBuilder) -> Result<Value, ProxyError> {
        let response = request
            .send()
            .await
            .map_err(|e| ProxyError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ProxyError::Upstream(format!(
                "upstream returned status {}",
                response.status()
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ProxyError::Upstream(e.to_string()))
    }
}
