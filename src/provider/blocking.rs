use std::time::Duration;

use reqwest::blocking::Client;

use super::error::ProviderError;
use super::types::StatusResponse;
use crate::state_machine::JobStatus;

/// One status round-trip that blocks the calling thread.
pub trait BlockingStatusQuery {
    fn query(&self, job_id: &str) -> Result<JobStatus, ProviderError>;
}

/// Blocking client for the `GET /status` endpoint.
///
/// Must not be created or dropped inside an async runtime.
#[derive(Debug, Clone)]
pub struct BlockingStatusClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl BlockingStatusClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(ProviderError::Network)?;
        let base_url = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn get_status(&self, job_id: &str) -> Result<JobStatus, ProviderError> {
        let url = format!("{}/status", self.base_url);
        let mut request = self.client.get(&url);
        if !job_id.is_empty() {
            request = request.query(&[("job_id", job_id)]);
        }

        let response = request
            .send()
            .map_err(|e| ProviderError::from_transport(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ProviderError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .map_err(|e| ProviderError::from_transport(e, self.timeout))?;
        StatusResponse::parse(&body)
    }
}

impl BlockingStatusQuery for BlockingStatusClient {
    fn query(&self, job_id: &str) -> Result<JobStatus, ProviderError> {
        self.get_status(job_id)
    }
}
