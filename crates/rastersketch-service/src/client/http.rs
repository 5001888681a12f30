//! HTTP/JSON implementation of the rasterization service client
//!
//! Every call is a single `POST` with a JSON body. Failures are mapped onto
//! [`ServiceError`]:
//! - no response within the timeout: `Timeout`
//! - connection or transport failure: `Transport`
//! - non-2xx status: `Status` (with the response body)
//! - body that does not parse: `MalformedResponse`

use std::time::Duration;

use async_trait::async_trait;
use rastersketch_core::ServiceError;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::RasterService;
use crate::protocol::{
    ClipRequest, ClipResponse, DrawRequest, DrawResponse, TransformRequest, TransformResponse,
    CLIP_ENDPOINT, DRAW_ENDPOINT, TRANSFORM_ENDPOINT,
};

/// Connection settings for [`HttpRasterService`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpServiceConfig {
    /// Base URL, e.g. `http://localhost:8080`
    pub base_url: String,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for HttpServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_ms: 5000,
        }
    }
}

/// Rasterization service reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpRasterService {
    client: reqwest::Client,
    config: HttpServiceConfig,
}

impl HttpRasterService {
    /// Create a client for the service at `config.base_url`
    pub fn new(config: HttpServiceConfig) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ServiceError::Transport {
                endpoint: config.base_url.clone(),
                reason: format!("failed to build HTTP client: {}", e),
            })?;
        Ok(Self { client, config })
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpServiceConfig {
        &self.config
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), endpoint)
    }

    async fn post<B, R>(&self, endpoint: &str, body: &B) -> Result<R, ServiceError>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url(endpoint);
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.request_error(endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("{} returned status {}", endpoint, status.as_u16());
            return Err(ServiceError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.request_error(endpoint, e))?;

        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!("{} returned an unparsable body: {}", endpoint, e);
            ServiceError::MalformedResponse {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            }
        })
    }

    fn request_error(&self, endpoint: &str, error: reqwest::Error) -> ServiceError {
        tracing::warn!("{} request failed: {}", endpoint, error);
        if error.is_timeout() {
            ServiceError::Timeout {
                endpoint: endpoint.to_string(),
                timeout_ms: self.config.timeout_ms,
            }
        } else {
            ServiceError::Transport {
                endpoint: endpoint.to_string(),
                reason: error.to_string(),
            }
        }
    }
}

#[async_trait]
impl RasterService for HttpRasterService {
    async fn draw(&self, request: &DrawRequest) -> Result<DrawResponse, ServiceError> {
        self.post(DRAW_ENDPOINT, request).await
    }

    async fn transform(
        &self,
        request: &TransformRequest,
    ) -> Result<TransformResponse, ServiceError> {
        self.post(TRANSFORM_ENDPOINT, request).await
    }

    async fn clip(&self, request: &ClipRequest) -> Result<ClipResponse, ServiceError> {
        self.post(CLIP_ENDPOINT, request).await
    }
}
