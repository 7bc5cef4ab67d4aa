//! Lenient JSON object body: non-JSON content types and empty bodies carry no fields.

use crate::error::AppError;
use crate::response::error_body;
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{Map, Value};

/// Top-level fields of the request body. A body whose Content-Type is not JSON,
/// an empty body, or a JSON value that is not an object yields no fields;
/// malformed JSON is rejected with 400.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JsonObject(pub Map<String, Value>);

impl JsonObject {
    pub fn parse(bytes: &[u8]) -> Result<Self, AppError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonObject::default());
        }
        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(m)) => Ok(JsonObject(m)),
            Ok(_) => Ok(JsonObject::default()),
            Err(e) => {
                tracing::debug!(error = %e, "rejecting malformed JSON body");
                Err(AppError::InvalidJson)
            }
        }
    }
}

/// `application/json` or any `application/*+json`, parameters ignored.
pub fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let mime = value.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
    match mime.strip_prefix("application/") {
        Some(subtype) => subtype == "json" || subtype.ends_with("+json"),
        None => false,
    }
}

#[async_trait]
impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json_content_type(req.headers()) {
            return Ok(JsonObject::default());
        }
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            (rejection.status(), Json(error_body(rejection.body_text()))).into_response()
        })?;
        JsonObject::parse(&bytes).map_err(IntoResponse::into_response)
    }
}
