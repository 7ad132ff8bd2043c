//! Mapping of handler failures to HTTP responses.

use crate::domain::validation::Rejection;
use crate::transport::http::types::ErrorResponse;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Message returned for every server-side failure.
pub const SERVER_ERROR: &str = "Error de servidor";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 400 with the message returned as is.
    #[error("{0}")]
    BadRequest(String),
    /// 500 with [`SERVER_ERROR`]; the cause is only logged.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn invalid_json(err: JsonRejection) -> Self {
        ApiError::BadRequest(format!("JSON inválido: {}", err.body_text()))
    }
}

impl From<Rejection> for ApiError {
    fn from(r: Rejection) -> Self {
        match r {
            Rejection::Invalid(msg) => ApiError::BadRequest(msg),
            Rejection::Store(e) => ApiError::Internal(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(e) => {
                tracing::error!(error = %format!("{e:#}"), "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR.to_string())
            }
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}
