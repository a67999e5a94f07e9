//! Axum HTTP handlers for the web server
//!
//! Every DAS route shares [`forward`]: decode the body, normalize it into the
//! operation's parameter record, dispatch one JSON-RPC call and hand back the
//! remote `result` untouched.

use axum::{body::Bytes, extract::State, Json};
use serde::Serialize;
use serde_json::Value;

use crate::domain::{utils::parse_input, DasRequest};
use crate::errors::AppError;
use crate::rpc::dispatch;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn forward<R: DasRequest>(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let input: R::Input = parse_input(&body)?;
    let params = R::from_input(input)?;

    let result = dispatch(state.rpc.as_ref(), R::METHOD, &params)
        .await
        .map_err(|err| AppError::upstream(R::METHOD, R::FAILURE_MESSAGE, err))?;

    Ok(Json(result))
}
