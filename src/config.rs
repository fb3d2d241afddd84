//! Configuração do jobpoll carregada a partir de `jobpoll.toml`.
//!
//! A struct [`JobPollConfig`] contém todos os parâmetros configuráveis.
//! Valores não presentes no arquivo usam defaults sensíveis.
//! A variável de ambiente `JOBPOLL_BASE_URL` tem precedência sobre o arquivo.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::simulator::SimulatorConfig;
use crate::state_machine::PollOptions;

/// Nome do arquivo de configuração procurado no diretório atual.
pub const CONFIG_FILE: &str = "jobpoll.toml";

/// Variável de ambiente que sobrescreve `base_url`.
pub const BASE_URL_ENV: &str = "JOBPOLL_BASE_URL";

/// Configuração de nível superior carregada de `jobpoll.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct JobPollConfig {
    /// URL base do serviço de status.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout de cada consulta individual, em segundos.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: f64,

    /// Parâmetros de polling (prazo, intervalos, estratégia).
    #[serde(default)]
    pub poll: PollOptions,

    /// Modelos de atraso e erro do provedor simulado.
    #[serde(default)]
    pub simulator: SimulatorConfig,
}

// Valor padrão para a URL base: o servidor simulado local.
fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

// Valor padrão para o timeout por consulta: 5s.
fn default_request_timeout_secs() -> f64 {
    5.0
}

impl Default for JobPollConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            poll: PollOptions::default(),
            simulator: SimulatorConfig::default(),
        }
    }
}

impl JobPollConfig {
    /// Carrega a configuração de `jobpoll.toml` no diretório atual.
    /// Usa valores padrão se o arquivo não existir.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Carrega a configuração de um caminho explícito.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            toml::from_str::<JobPollConfig>(&contents)
                .with_context(|| format!("failed to parse {}", path.display()))?
        } else {
            Self::default()
        };

        // Variável de ambiente tem precedência sobre o arquivo para a URL base.
        if let Ok(url) = std::env::var(BASE_URL_ENV)
            && !url.is_empty()
        {
            config.base_url = url;
        }

        Ok(config)
    }

    /// Timeout por consulta como `Duration`.
    pub fn request_timeout(&self) -> Result<Duration> {
        Duration::try_from_secs_f64(self.request_timeout_secs)
            .ok()
            .filter(|d| !d.is_zero())
            .with_context(|| {
                format!(
                    "request_timeout_secs must be a positive number, got {}",
                    self.request_timeout_secs
                )
            })
    }
}
