use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub apikey: String,
    pub premium: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProtectedResponse {
    pub message: String,
    pub user: String,
}

/// Envelope for proxied upstream results.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProxyResponse {
    pub status: bool,
    pub creator: String,
    pub result: Value,
}

impl ProxyResponse {
    pub fn success(result: Value) -> Self {
        Self {
            status: true,
            creator: env!("CARGO_PKG_NAME").to_string(),
            result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proxy_envelope_shape() {
        let body = ProxyResponse::success(serde_json::json!({"id": 1}));
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["status"], true);
        assert_eq!(json["creator"], env!("CARGO_PKG_NAME"));
        assert_eq!(json["result"]["id"], 1);
    }
}
