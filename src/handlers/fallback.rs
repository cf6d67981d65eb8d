use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Plain-text 404 for every unmatched route.
pub async fn fallback_handler() -> Response {
    (StatusCode::NOT_FOUND, "Sorry can't find that!").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fallback_is_404() {
        let response = fallback_handler().await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
