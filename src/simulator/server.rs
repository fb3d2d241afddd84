use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{debug, info};

use super::models::{DelayModel, ErrorModel};
use crate::provider::StatusResponse;
use crate::state_machine::JobStatus;

const DEFAULT_JOB: &str = "default";

/// Delay and error models for the simulated status provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    #[serde(default)]
    pub delay: DelayModel,
    #[serde(default)]
    pub error: ErrorModel,
}

impl SimulatorConfig {
    pub fn validate(&self) -> Result<()> {
        self.delay.validate().context("invalid delay model")?;
        self.error.validate().context("invalid error model")?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
struct JobClock {
    started: Instant,
    delay: Duration,
}

/// A synthetic job service: each job stays `pending` for a sampled delay,
/// then reports `completed`. Every query independently may answer `error`.
///
/// Job clocks are kept for the lifetime of the simulator and never pruned,
/// so memory grows with the number of distinct job ids seen.
#[derive(Debug)]
pub struct Simulator {
    config: SimulatorConfig,
    jobs: Mutex<HashMap<String, JobClock>>,
}

impl Simulator {
    pub fn new(config: SimulatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            jobs: Mutex::new(HashMap::new()),
        })
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Answer one status query for `job_id` at `now`.
    ///
    /// The first query for a job starts its clock and draws its delay.
    pub fn status_at<R: Rng + ?Sized>(&self, job_id: &str, now: Instant, rng: &mut R) -> JobStatus {
        let clock = {
            let mut jobs = self.jobs.lock().unwrap_or_else(|e| e.into_inner());
            *jobs.entry(job_id.to_string()).or_insert_with(|| {
                let delay = self.config.delay.sample(rng);
                info!(job_id, delay_ms = delay.as_millis() as u64, "simulated job registered");
                JobClock {
                    started: now,
                    delay,
                }
            })
        };

        if self.config.error.draw(rng) {
            return JobStatus::Error;
        }

        if now.saturating_duration_since(clock.started) < clock.delay {
            JobStatus::Pending
        } else {
            JobStatus::Completed
        }
    }
}

#[derive(Debug, Deserialize)]
struct StatusParams {
    job_id: Option<String>,
}

/// Absent and empty ids both address the default job.
fn job_key(job_id: Option<&str>) -> &str {
    job_id.filter(|id| !id.is_empty()).unwrap_or(DEFAULT_JOB)
}

async fn status(
    State(simulator): State<Arc<Simulator>>,
    Query(params): Query<StatusParams>,
) -> Json<StatusResponse> {
    let job_id = job_key(params.job_id.as_deref());
    let result = simulator.status_at(job_id, Instant::now(), &mut rand::thread_rng());
    debug!(job_id, %result, "status answered");
    Json(StatusResponse { result })
}

/// `GET /status?job_id=...` backed by `simulator`.
pub fn router(simulator: Arc<Simulator>) -> Router {
    Router::new()
        .route("/status", get(status))
        .with_state(simulator)
}

/// Serve the simulator on an already bound listener until the task is dropped.
pub async fn serve(listener: TcpListener, config: SimulatorConfig) -> Result<()> {
    let simulator = Arc::new(Simulator::new(config)?);
    let addr = listener.local_addr().context("listener has no local address")?;
    info!(%addr, "simulated status provider listening");
    axum::serve(listener, router(simulator))
        .await
        .context("simulator server failed")?;
    Ok(())
}
