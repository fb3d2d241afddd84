//! Interface de linha de comando do jobpoll baseada em clap.
//!
//! Define a struct [`Cli`] com subcomandos [`Command`] (poll, serve)
//! e flags globais (--config, --verbose).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::state_machine::{BackoffStrategy, PollOptions};

/// jobpoll — acompanha jobs remotos consultando um endpoint de status.
#[derive(Debug, Parser)]
#[command(name = "jobpoll", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Caminho para o arquivo de configuração (padrão: ./jobpoll.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Habilita saída detalhada (verbose).
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

/// Estratégia aceita pela CLI, mapeada para [`BackoffStrategy`] internamente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Intervalo constante entre consultas.
    Fixed,
    /// Intervalo multiplicado a cada consulta, até o máximo.
    #[value(alias = "exponential_backoff", alias = "exponential")]
    ExponentialBackoff,
}

impl From<StrategyArg> for BackoffStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Fixed => BackoffStrategy::Fixed,
            StrategyArg::ExponentialBackoff => BackoffStrategy::ExponentialBackoff,
        }
    }
}

/// Flags que sobrescrevem a seção `[poll]` do arquivo de configuração.
#[derive(Debug, Default, Args)]
pub struct PollArgs {
    /// Prazo total da sessão, em segundos.
    #[arg(long)]
    pub max_wait: Option<f64>,

    /// Intervalo inicial entre consultas, em segundos.
    #[arg(long)]
    pub interval: Option<f64>,

    /// Estratégia de backoff.
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Intervalo máximo (backoff exponencial), em segundos.
    #[arg(long)]
    pub max_interval: Option<f64>,

    /// Fator de crescimento (backoff exponencial).
    #[arg(long)]
    pub factor: Option<f64>,
}

impl PollArgs {
    /// Aplica as flags presentes sobre as opções carregadas do arquivo.
    pub fn apply(&self, mut options: PollOptions) -> PollOptions {
        if let Some(max_wait) = self.max_wait {
            options.max_wait_secs = max_wait;
        }
        if let Some(interval) = self.interval {
            options.initial_interval_secs = interval;
        }
        if let Some(strategy) = self.strategy {
            options.strategy = BackoffStrategy::from(strategy).to_string();
        }
        if let Some(max_interval) = self.max_interval {
            options.max_interval_secs = max_interval;
        }
        if let Some(factor) = self.factor {
            options.backoff_factor = factor;
        }
        options
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Consulta o status de um job até um resultado terminal.
    Poll {
        /// Identificador do job (omitido: o servidor usa o job padrão).
        job_id: Option<String>,

        /// URL base do serviço de status (sobrescreve a configuração).
        #[arg(long)]
        base_url: Option<String>,

        /// Timeout de cada consulta, em segundos.
        #[arg(long)]
        timeout: Option<f64>,

        /// Usa o modelo bloqueante em vez do cooperativo.
        #[arg(long, default_value_t = false)]
        blocking: bool,

        #[command(flatten)]
        poll: PollArgs,
    },

    /// Executa o provedor de status simulado.
    Serve {
        /// Endereço de escuta.
        #[arg(long, default_value = "127.0.0.1:5000")]
        addr: String,
    },
}
