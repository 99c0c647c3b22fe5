//! Procedure error types with IntoResponse
//!
//! Errors become tRPC-style JSON bodies with matching HTTP status codes:
//!
//! ```json
//! {"error":{"message":"...","code":-32600,"data":{"code":"BAD_REQUEST","httpStatus":400}}}
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use acme_db::{DbError, ValidationError};

/// Procedure error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Input failed the declared schema (400)
    Validation(ValidationError),

    /// Protected procedure called without a valid capability (401)
    Unauthorized,

    /// No such procedure (404)
    NotFound { procedure: String },

    /// Procedure exists but not for this HTTP method (405)
    MethodNotSupported { procedure: String, method: String },

    /// Database error (500, logged)
    Database(DbError),
}

impl ApiError {
    /// tRPC error code name
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "BAD_REQUEST",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::MethodNotSupported { .. } => "METHOD_NOT_SUPPORTED",
            Self::Database(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::MethodNotSupported { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON-RPC numeric code used by tRPC for each error name
    fn rpc_code(&self) -> i32 {
        match self {
            Self::Validation(_) => -32600,
            Self::Unauthorized => -32001,
            Self::NotFound { .. } => -32004,
            Self::MethodNotSupported { .. } => -32005,
            Self::Database(_) => -32603,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::Unauthorized => "authentication required".to_owned(),
            Self::NotFound { procedure } => format!("no procedure on path \"{}\"", procedure),
            Self::MethodNotSupported { procedure, method } => {
                format!("{} is not supported for \"{}\"", method, procedure)
            }
            Self::Database(e) => e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Database(e) = &self {
            tracing::error!("Database error: {}", e);
        }

        let status = self.status();
        let body = json!({
            "error": {
                "message": self.message(),
                "code": self.rpc_code(),
                "data": {
                    "code": self.code(),
                    "httpStatus": status.as_u16(),
                }
            }
        });

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        Self::Database(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_is_400() {
        let err = ApiError::Validation(ValidationError::Empty { field: "title" });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["data"]["code"], "BAD_REQUEST");
        assert_eq!(body["error"]["message"], "title cannot be empty");
    }

    #[tokio::test]
    async fn unauthorized_is_401() {
        let response = ApiError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn unknown_procedure_is_404() {
        let err = ApiError::NotFound {
            procedure: "post.update".into(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], -32004);
    }

    #[tokio::test]
    async fn wrong_method_is_405() {
        let err = ApiError::MethodNotSupported {
            procedure: "post.create".into(),
            method: "GET".into(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], -32005);
        assert_eq!(body["error"]["data"]["code"], "METHOD_NOT_SUPPORTED");
        assert_eq!(body["error"]["message"], "GET is not supported for \"post.create\"");
    }

    #[tokio::test]
    async fn database_error_is_500() {
        let err = ApiError::from(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"]["data"]["code"], "INTERNAL_SERVER_ERROR");
    }
}
