//! Interface de terminal do jobpoll — spinner e saída colorida.
//!
//! Usa as crates `indicatif` para o spinner de progresso e `console` para
//! estilização com cores. O [`PollProgress`] acompanha visualmente uma
//! sessão de polling e também serve como observador de mudanças de status.

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::PollError;
use crate::state_machine::{JobStatus, StatusChange, StatusObserver};

/// Indicador visual de progresso para uma sessão de polling no terminal.
///
/// Exibe um spinner animado enquanto o job está pendente e mensagens
/// coloridas para conclusão (verde), erro (vermelho) e mudanças (amarelo).
pub struct PollProgress {
    // Barra de progresso/spinner do indicatif.
    pb: ProgressBar,
    // Identificador do job acompanhado.
    job_id: String,
    // Estilo verde para mensagens de sucesso.
    green: Style,
    // Estilo vermelho para mensagens de falha.
    red: Style,
    // Estilo amarelo para mudanças de status intermediárias.
    yellow: Style,
}

impl PollProgress {
    /// Inicia o spinner para o job e retorna a instância de progresso.
    pub fn start(job_id: &str) -> Self {
        Self::with_bar(job_id, ProgressBar::new_spinner())
    }

    /// Variante sem saída no terminal (útil em testes e pipes).
    pub fn hidden(job_id: &str) -> Self {
        Self::with_bar(job_id, ProgressBar::hidden())
    }

    fn with_bar(job_id: &str, pb: ProgressBar) -> Self {
        // O template é constante; se falhar, o estilo padrão é mantido.
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(format!("{job_id}: waiting for first status"));
        pb.enable_steady_tick(std::time::Duration::from_millis(100));

        Self {
            pb,
            job_id: job_id.to_string(),
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
            yellow: Style::new().yellow(),
        }
    }

    /// Mensagem exibida para uma mudança de status.
    fn describe(&self, change: &StatusChange) -> String {
        match &change.previous {
            Some(previous) => format!("{}: {previous} → {}", self.job_id, change.current),
            None => format!("{}: {}", self.job_id, change.current),
        }
    }

    /// Finaliza o spinner e exibe o resultado final da sessão.
    ///
    /// `completed` é mostrado em verde; `error` e falhas do polling em vermelho.
    pub fn complete(&self, outcome: &Result<JobStatus, PollError>) {
        self.pb.finish_and_clear();
        match outcome {
            Ok(JobStatus::Completed) => {
                println!("  {} {} completed", self.green.apply_to("✓"), self.job_id);
            }
            Ok(status) => {
                println!(
                    "  {} {} finished with status: {status}",
                    self.red.apply_to("✗"),
                    self.job_id
                );
            }
            Err(e) => {
                println!("  {} Polling failed: {e}", self.red.apply_to("✗"));
            }
        }
    }
}

impl StatusObserver for PollProgress {
    fn on_status_change(&mut self, change: &StatusChange) -> anyhow::Result<()> {
        let line = self.describe(change);
        self.pb
            .println(format!("  {} {line}", self.yellow.apply_to("↻")));
        self.pb.set_message(line);
        Ok(())
    }
}
