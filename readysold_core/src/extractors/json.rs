//! JSON extractor that ignores the content type and treats an empty body as `{}`

use axum::{
    async_trait,
    body::{Body, Bytes},
    extract::{rejection::BytesRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

/// Landing pages sometimes post `text/plain` to avoid a preflight, so the body is parsed as
/// JSON whatever the `Content-Type` says. Only a top-level object is read into `T`; arrays and
/// scalars carry no members and yield `T::default()`.
pub struct LenientJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for LenientJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = LenientJsonRejection;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(LenientJsonRejection::Body)?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(LenientJson(T::default()));
        }

        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|e| LenientJsonRejection::InvalidJson(e.to_string()))?;

        match value {
            Value::Object(_) => serde_json::from_value(value)
                .map(LenientJson)
                .map_err(|e| LenientJsonRejection::InvalidJson(e.to_string())),
            _ => Ok(LenientJson(T::default())),
        }
    }
}

#[derive(Debug)]
pub enum LenientJsonRejection {
    InvalidJson(String),
    Body(BytesRejection),
}

impl IntoResponse for LenientJsonRejection {
    fn into_response(self) -> Response {
        match self {
            LenientJsonRejection::InvalidJson(msg) => {
                tracing::debug!("rejected request body: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Invalid JSON body" })),
                )
                    .into_response()
            }
            LenientJsonRejection::Body(rejection) => {
                let status = rejection.status();
                (status, Json(json!({ "error": rejection.body_text() }))).into_response()
            }
        }
    }
}
