//! Route handlers organized by router

pub mod health;
pub mod post;

use axum::http::{Method, Uri};

use crate::error::ApiError;

fn procedure_name(uri: &Uri) -> String {
    let path = uri.path();
    path.strip_prefix("/trpc/").unwrap_or(path).to_owned()
}

/// Fallback for paths that name no procedure
pub async fn unknown_procedure(uri: Uri) -> ApiError {
    ApiError::NotFound {
        procedure: procedure_name(&uri),
    }
}

/// Fallback for a known procedure called with the wrong method
pub async fn unsupported_method(method: Method, uri: Uri) -> ApiError {
    ApiError::MethodNotSupported {
        procedure: procedure_name(&uri),
        method: method.to_string(),
    }
}
