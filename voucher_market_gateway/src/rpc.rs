use std::{str::FromStr, time::Duration};

use log::*;
use serde_json::Value;
use vms_common::RpcCode;

use crate::errors::GatewayError;

const RPC_TIMEOUT: Duration = Duration::from_secs(30);

/// A typed-enough client for the marketplace RPC service. Responses are passed through as JSON values; error
/// bodies are classified by their `code` field and nothing else.
#[derive(Clone, Debug)]
pub struct RpcClient {
    http: reqwest::Client,
    base_url: String,
}

impl RpcClient {
    pub fn new(base_url: &str) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(RPC_TIMEOUT)
            .build()
            .map_err(|e| GatewayError::InitializeError(e.to_string()))?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_string() })
    }

    pub async fn get(&self, path_and_query: &str) -> Result<Value, GatewayError> {
        let url = format!("{}{path_and_query}", self.base_url);
        trace!("🔁️ GET {url}");
        let response = self.http.get(&url).send().await.map_err(|e| GatewayError::Upstream(e.to_string()))?;
        Self::into_rpc_result(response).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<Value, GatewayError> {
        let url = format!("{}{path}", self.base_url);
        trace!("🔁️ POST {url}");
        let response =
            self.http.post(&url).json(body).send().await.map_err(|e| GatewayError::Upstream(e.to_string()))?;
        Self::into_rpc_result(response).await
    }

    async fn into_rpc_result(response: reqwest::Response) -> Result<Value, GatewayError> {
        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| GatewayError::Upstream(format!("invalid response body: {e}")))?;
        if status.is_success() {
            return Ok(body);
        }
        let code = body
            .get("code")
            .and_then(Value::as_str)
            .and_then(|c| RpcCode::from_str(c).ok())
            .unwrap_or(RpcCode::Internal);
        let message =
            body.get("message").and_then(Value::as_str).unwrap_or("internal server error").to_string();
        debug!("🔁️ RPC call failed with code {code}: {message}");
        Err(GatewayError::Rpc { code, message })
    }
}
