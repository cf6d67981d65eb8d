use crate::models::responses::ErrorResponse;
use axum::{
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::de::DeserializeOwned;

/// Body extractor accepting either a urlencoded form or a JSON document.
///
/// The registration and login pages post forms, while API clients send
/// JSON; both intakes map to the same body type.
pub struct FormOrJson<T>(pub T);

impl<S, T> FromRequest<S> for FormOrJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|content_type| content_type.starts_with("application/json"));

        if is_json {
            let Json(body) = Json::<T>::from_request(req, state).await.map_err(reject)?;
            Ok(FormOrJson(body))
        } else {
            let Form(body) = Form::<T>::from_request(req, state).await.map_err(reject)?;
            Ok(FormOrJson(body))
        }
    }
}

fn reject<E: std::fmt::Display>(err: E) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}
