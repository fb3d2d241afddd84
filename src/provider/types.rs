//! Tipos de dados da resposta do endpoint `GET /status`.
//!
//! O corpo esperado é um objeto JSON com um único campo `result`.

use serde::{Deserialize, Serialize};

use super::error::ProviderError;
use crate::state_machine::JobStatus;

/// Corpo de resposta do endpoint `/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Status atual do job ("pending", "completed" ou "error").
    pub result: JobStatus,
}

impl StatusResponse {
    /// Interpreta o corpo bruto da resposta.
    ///
    /// Qualquer corpo sem um campo `result` do tipo string é malformado.
    pub fn parse(body: &str) -> Result<JobStatus, ProviderError> {
        serde_json::from_str::<StatusResponse>(body)
            .map(|response| response.result)
            .map_err(|e| ProviderError::Malformed(e.to_string()))
    }
}
