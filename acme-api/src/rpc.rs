//! Procedure input/output envelopes
//!
//! Queries carry their input as URL-encoded JSON in `?input=`, mutations (and
//! queries sent as `POST`) as a JSON request body. Results are wrapped as
//! `{"result":{"data":...}}`.

use axum::body::Bytes;
use axum::extract::{FromRequest, Query, Request};
use axum::http::Method;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use acme_db::ValidationError;

use crate::error::ApiError;

/// Decoded procedure input.
///
/// Any decoding failure (bad JSON, missing or unknown fields) is a
/// validation error and is rejected before the handler runs.
#[derive(Debug)]
pub struct RpcInput<T>(pub T);

#[derive(Deserialize)]
struct QueryInput {
    input: Option<String>,
}

impl<S, T> FromRequest<S> for RpcInput<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value = if req.method() == Method::GET {
            let Query(query) = Query::<QueryInput>::try_from_uri(req.uri())
                .map_err(|e| ApiError::Validation(ValidationError::malformed(e)))?;
            match query.input {
                Some(raw) => decode(raw.as_bytes())?,
                None => serde_json::Value::Null,
            }
        } else {
            let body = Bytes::from_request(req, state)
                .await
                .map_err(|e| ApiError::Validation(ValidationError::malformed(e)))?;
            if body.is_empty() {
                serde_json::Value::Null
            } else {
                decode(&body)?
            }
        };

        serde_json::from_value(value)
            .map(Self)
            .map_err(|e| ApiError::Validation(ValidationError::malformed(e)))
    }
}

fn decode(raw: &[u8]) -> Result<serde_json::Value, ApiError> {
    serde_json::from_slice(raw).map_err(|e| ApiError::Validation(ValidationError::malformed(e)))
}

/// Successful procedure result
#[derive(Debug)]
pub struct RpcOutput<T>(pub T);

impl<T: Serialize> IntoResponse for RpcOutput<T> {
    fn into_response(self) -> Response {
        Json(json!({ "result": { "data": self.0 } })).into_response()
    }
}
