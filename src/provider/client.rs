use std::future::Future;
use std::time::Duration;

use reqwest::Client;

use super::error::ProviderError;
use super::types::StatusResponse;
use crate::state_machine::JobStatus;

/// One status round-trip, awaited by the cooperative poller.
pub trait StatusQuery: Send + Sync {
    fn query(&self, job_id: &str)
    -> impl Future<Output = Result<JobStatus, ProviderError>> + Send;
}

/// Async client for the `GET /status` endpoint.
#[derive(Debug, Clone)]
pub struct StatusClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl StatusClient {
    /// Create a client whose every query is bounded by `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(ProviderError::Network)?;
        Ok(Self::with_client(base_url, client, timeout))
    }

    /// Use a preconfigured reqwest client. `timeout` is only used to label
    /// timeout errors; the client's own timeout applies.
    pub fn with_client(base_url: impl Into<String>, client: Client, timeout: Duration) -> Self {
        let base_url = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn get_status(&self, job_id: &str) -> Result<JobStatus, ProviderError> {
        let url = format!("{}/status", self.base_url);
        let mut request = self.client.get(&url);
        if !job_id.is_empty() {
            request = request.query(&[("job_id", job_id)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ProviderError::from_transport(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ProviderError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::from_transport(e, self.timeout))?;
        StatusResponse::parse(&body)
    }
}

impl StatusQuery for StatusClient {
    async fn query(&self, job_id: &str) -> Result<JobStatus, ProviderError> {
        self.get_status(job_id).await
    }
}
