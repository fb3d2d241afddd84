//! Tipos de erro para as consultas ao endpoint de status.
//!
//! Define [`ProviderError`], o único tipo de erro de uma consulta. Falhas de
//! transporte, timeouts, respostas não-2xx e corpos malformados são todos
//! traduzidos para uma de suas variantes.

use std::time::Duration;

use thiserror::Error;

/// Erros que podem ocorrer em uma única consulta de status.
///
/// - [`Timeout`](ProviderError::Timeout) — a consulta excedeu o timeout por chamada
/// - [`ApiError`](ProviderError::ApiError) — o servidor respondeu com status não-2xx
/// - [`Malformed`](ProviderError::Malformed) — o corpo não tem um campo `result` válido
/// - [`Network`](ProviderError::Network) — falha na camada de rede
#[derive(Debug, Error)]
pub enum ProviderError {
    /// A consulta não terminou dentro do timeout por chamada.
    #[error("status query timed out after {0:?}")]
    Timeout(Duration),

    /// O endpoint respondeu com um status HTTP de falha.
    #[error("status endpoint returned {status}: {message}")]
    ApiError { status: u16, message: String },

    /// A resposta não pôde ser interpretada.
    #[error("malformed status response: {0}")]
    Malformed(String),

    /// Falha de rede subjacente (DNS, conexão recusada, conexão resetada).
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
}

impl ProviderError {
    /// Traduz um erro do `reqwest`, separando timeouts do resto.
    pub(crate) fn from_transport(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout(timeout)
        } else if err.is_decode() {
            ProviderError::Malformed(err.to_string())
        } else {
            ProviderError::Network(err)
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ProviderError::Timeout(_))
    }
}
