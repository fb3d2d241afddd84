use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::backoff::{BackoffPolicy, BackoffStrategy};
use crate::error::PollError;

/// Caller-facing polling parameters, as read from config or the CLI.
///
/// Nothing here is trusted until [`PollOptions::validate`] runs, which the
/// engine does once when a session starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollOptions {
    /// Overall deadline for the session, in seconds.
    #[serde(default = "default_max_wait_secs")]
    pub max_wait_secs: f64,

    /// First wait between two queries, in seconds.
    #[serde(default = "default_initial_interval_secs")]
    pub initial_interval_secs: f64,

    /// `fixed` or `exponential_backoff`.
    #[serde(default = "default_strategy")]
    pub strategy: String,

    /// Upper bound on the wait under exponential backoff, in seconds.
    #[serde(default = "default_max_interval_secs")]
    pub max_interval_secs: f64,

    /// Growth factor under exponential backoff.
    #[serde(default = "default_backoff_factor")]
    pub backoff_factor: f64,
}

fn default_max_wait_secs() -> f64 {
    300.0
}

fn default_initial_interval_secs() -> f64 {
    5.0
}

fn default_strategy() -> String {
    "fixed".to_string()
}

fn default_max_interval_secs() -> f64 {
    60.0
}

fn default_backoff_factor() -> f64 {
    2.0
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            max_wait_secs: default_max_wait_secs(),
            initial_interval_secs: default_initial_interval_secs(),
            strategy: default_strategy(),
            max_interval_secs: default_max_interval_secs(),
            backoff_factor: default_backoff_factor(),
        }
    }
}

/// Options after validation: what a session actually runs on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedOptions {
    pub max_wait: Duration,
    pub policy: BackoffPolicy,
}

impl PollOptions {
    /// Fixed-interval polling.
    pub fn fixed(max_wait: Duration, interval: Duration) -> Self {
        Self {
            max_wait_secs: max_wait.as_secs_f64(),
            initial_interval_secs: interval.as_secs_f64(),
            strategy: BackoffStrategy::Fixed.to_string(),
            ..Self::default()
        }
    }

    /// Exponential backoff starting at `initial`, capped at `max`.
    pub fn exponential(max_wait: Duration, initial: Duration, max: Duration, factor: f64) -> Self {
        Self {
            max_wait_secs: max_wait.as_secs_f64(),
            initial_interval_secs: initial.as_secs_f64(),
            strategy: BackoffStrategy::ExponentialBackoff.to_string(),
            max_interval_secs: max.as_secs_f64(),
            backoff_factor: factor,
        }
    }

    pub fn validate(&self) -> Result<ValidatedOptions, PollError> {
        let strategy: BackoffStrategy = self.strategy.parse()?;
        let max_wait = seconds("max_wait", self.max_wait_secs)?;
        if max_wait.is_zero() {
            return Err(PollError::InvalidConfiguration(
                "max_wait must be greater than zero".into(),
            ));
        }
        let initial = seconds("initial_interval", self.initial_interval_secs)?;
        let max = match strategy {
            BackoffStrategy::Fixed => initial,
            BackoffStrategy::ExponentialBackoff => {
                seconds("max_interval", self.max_interval_secs)?
            }
        };
        let policy = BackoffPolicy::new(strategy, initial, max, self.backoff_factor)?;
        Ok(ValidatedOptions { max_wait, policy })
    }
}

fn seconds(name: &str, value: f64) -> Result<Duration, PollError> {
    Duration::try_from_secs_f64(value).map_err(|_| {
        PollError::InvalidConfiguration(format!(
            "{name} must be a finite, non-negative number of seconds, got {value}"
        ))
    })
}
