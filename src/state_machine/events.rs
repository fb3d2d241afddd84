use std::time::Duration;

use tracing::{debug, info, warn};

use super::backoff::BackoffStrategy;
use super::notify::StatusChange;
use super::status::JobStatus;
use crate::error::PollError;

/// Structured events emitted while a session runs.
#[derive(Debug)]
pub enum PollEvent<'a> {
    Started {
        job_id: &'a str,
        strategy: BackoffStrategy,
        max_wait: Duration,
    },
    Queried {
        job_id: &'a str,
        attempt: u32,
        status: &'a JobStatus,
    },
    Changed {
        job_id: &'a str,
        change: &'a StatusChange,
    },
    Waiting {
        job_id: &'a str,
        interval: Duration,
    },
    Finished {
        job_id: &'a str,
        status: &'a JobStatus,
        queries: u32,
        elapsed: Duration,
    },
    Failed {
        job_id: &'a str,
        error: &'a PollError,
        queries: u32,
        elapsed: Duration,
    },
}

/// Sink for session events, injected into every session.
pub trait PollEvents: Send + Sync {
    fn record(&self, event: &PollEvent<'_>);
}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEvents;

impl PollEvents for TracingEvents {
    fn record(&self, event: &PollEvent<'_>) {
        match event {
            PollEvent::Started {
                job_id,
                strategy,
                max_wait,
            } => info!(
                job_id,
                %strategy,
                max_wait_ms = max_wait.as_millis() as u64,
                "polling started"
            ),
            PollEvent::Queried {
                job_id,
                attempt,
                status,
            } => debug!(job_id, attempt, %status, "status queried"),
            PollEvent::Changed { job_id, change } => match &change.previous {
                Some(previous) => {
                    info!(job_id, %previous, status = %change.current, "status changed")
                }
                None => info!(job_id, status = %change.current, "first status observed"),
            },
            PollEvent::Waiting { job_id, interval } => {
                debug!(job_id, interval_ms = interval.as_millis() as u64, "waiting")
            }
            PollEvent::Finished {
                job_id,
                status,
                queries,
                elapsed,
            } => info!(
                job_id,
                %status,
                queries,
                elapsed_ms = elapsed.as_millis() as u64,
                "polling finished"
            ),
            PollEvent::Failed {
                job_id,
                error,
                queries,
                elapsed,
            } => warn!(
                job_id,
                kind = %error.kind(),
                queries,
                elapsed_ms = elapsed.as_millis() as u64,
                "polling failed: {error}"
            ),
        }
    }
}

/// Drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoEvents;

impl PollEvents for NoEvents {
    fn record(&self, _event: &PollEvent<'_>) {}
}
