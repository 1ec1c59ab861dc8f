use crate::{CliClientResult, ClientError};

use reqwest::{Client as ReqwestClient, Method};
use serde_json::Value;

pub const OPERATOR_ID_HEADER: &str = "X-Operator-Id";

/// HTTP client for the warden-server command API
pub struct Client {
    pub base_url: String,
    pub operator_id: Option<String>,
    client: ReqwestClient,
}

impl Client {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Daemon URL (e.g., "http://127.0.0.1:8750")
    /// * `operator_id` - Sent as `X-Operator-Id`; the daemon rejects commands without it
    pub fn new(base_url: &str, operator_id: Option<&str>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            operator_id: operator_id
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(String::from),
            client: ReqwestClient::new(),
        }
    }

    /// Build a request with the operator header when one is configured
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.request(method, &url);

        if let Some(ref operator_id) = self.operator_id {
            req = req.header(OPERATOR_ID_HEADER, operator_id);
        }

        req
    }

    /// Execute request and handle errors. Empty bodies come back as `Null`.
    async fn execute(&self, req: reqwest::RequestBuilder) -> CliClientResult<Value> {
        let response = req.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        let body: Value = if bytes.is_empty() {
            Value::Null
        } else if status.is_success() {
            serde_json::from_slice(&bytes)?
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        if !status.is_success() {
            let error = body.get("error");
            let code = error
                .and_then(|e| e.get("code"))
                .and_then(Value::as_str)
                .map(String::from)
                .unwrap_or_else(|| format!("HTTP_{}", status.as_u16()));
            let message = error
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
                .map(String::from)
                .unwrap_or_else(|| status.to_string());
            return Err(ClientError::api_error(code, message));
        }

        Ok(body)
    }

    // =========================================================================
    // Commands
    // =========================================================================

    pub async fn start(&self) -> CliClientResult<Value> {
        self.execute(self.request(Method::POST, "/api/v1/server/start"))
            .await
    }

    pub async fn stop(&self) -> CliClientResult<Value> {
        self.execute(self.request(Method::POST, "/api/v1/server/stop"))
            .await
    }

    pub async fn update(&self) -> CliClientResult<Value> {
        self.execute(self.request(Method::POST, "/api/v1/server/update"))
            .await
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub async fn status(&self) -> CliClientResult<Value> {
        self.execute(self.request(Method::GET, "/api/v1/server/status"))
            .await
    }

    pub async fn versions(&self) -> CliClientResult<Value> {
        self.execute(self.request(Method::GET, "/api/v1/server/versions"))
            .await
    }

    // =========================================================================
    // Admin
    // =========================================================================

    /// Ask the daemon to shut down gracefully (202, empty body)
    pub async fn shutdown(&self) -> CliClientResult<Value> {
        self.execute(self.request(Method::POST, "/admin/shutdown"))
            .await
    }
}
