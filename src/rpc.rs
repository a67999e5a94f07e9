//! JSON-RPC dispatch to the remote DAS indexer
//!
//! Every inbound operation ends in exactly one call through [`RpcTransport`]. The
//! production transport is [`HttpRpcClient`], which posts a JSON-RPC 2.0 envelope
//! to the configured endpoint and unwraps the `result` or `error` member.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub const JSON_RPC_VERSION: &str = "2.0";
pub const REQUEST_ID: u64 = 1;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("remote rpc error: {message}")]
    Upstream { message: String, code: Option<i64> },
    #[error("rpc transport failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("rpc json could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

impl RpcError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Upstream { .. } => "upstream",
            Self::Transport(_) => "transport",
            Self::Decode(_) => "decode",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JsonRpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: &'a Value,
}

#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<JsonRpcErrorObject>,
}

#[derive(Debug, Deserialize)]
pub struct JsonRpcErrorObject {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: String,
}

impl JsonRpcResponse {
    pub fn into_result(self) -> Result<Value, RpcError> {
        if let Some(error) = self.error {
            return Err(RpcError::Upstream {
                message: error.message,
                code: error.code,
            });
        }

        Ok(self.result.unwrap_or(Value::Null))
    }
}

#[async_trait]
pub trait RpcTransport: Send + Sync {
    async fn call(&self, method: &str, params: Value) -> Result<Value, RpcError>;
}

/// Encodes a typed parameter record and issues a single call with it.
pub async fn dispatch<P>(
    transport: &dyn RpcTransport,
    method: &str,
    params: &P,
) -> Result<Value, RpcError>
where
    P: Serialize + ?Sized,
{
    let params = serde_json::to_value(params)?;
    transport.call(method, params).await
}

#[derive(Debug, Clone)]
pub struct HttpRpcClient {
    endpoint: Url,
    client: Client,
}

impl HttpRpcClient {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl RpcTransport for HttpRpcClient {
    async fn call(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        let envelope = JsonRpcRequest {
            jsonrpc: JSON_RPC_VERSION,
            id: REQUEST_ID,
            method,
            params: &params,
        };

        debug!(method, endpoint = %self.endpoint, "dispatching rpc call");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&envelope)
            .send()
            .await?;

        // The status code is ignored, the envelope alone decides success.
        let status = response.status();
        let body = response.text().await?;
        debug!(method, status = status.as_u16(), "rpc response received");

        let parsed: JsonRpcResponse = serde_json::from_str(&body)?;
        parsed.into_result()
    }
}
