use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::rpc::RpcError;

/// Inbound request problems, detected before anything is sent upstream.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0}")]
    MissingParameter(&'static str),
    #[error("{0}")]
    InvalidShape(String),
}

impl ValidationError {
    pub fn invalid_shape(message: impl Into<String>) -> Self {
        Self::InvalidShape(message.into())
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(#[from] ValidationError),
    #[error("{failure_message}")]
    Upstream {
        method: &'static str,
        failure_message: &'static str,
        #[source]
        source: RpcError,
    },
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppError {
    pub fn upstream(method: &'static str, failure_message: &'static str, source: RpcError) -> Self {
        Self::Upstream {
            method,
            failure_message,
            source,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Self::Upstream {
                method,
                failure_message,
                source,
            } => {
                tracing::error!(
                    method,
                    kind = source.kind(),
                    error = %source,
                    "rpc dispatch failed"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    failure_message.to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
