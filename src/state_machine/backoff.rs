use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::PollError;

/// How the wait between two status queries evolves across iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffStrategy {
    /// Every wait equals the initial interval.
    Fixed,
    /// Each wait is the previous one times the backoff factor, capped.
    ExponentialBackoff,
}

impl FromStr for BackoffStrategy {
    type Err = PollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(BackoffStrategy::Fixed),
            "exponential_backoff" | "exponential" => Ok(BackoffStrategy::ExponentialBackoff),
            other => Err(PollError::InvalidConfiguration(format!(
                "unknown backoff strategy `{other}` (expected `fixed` or `exponential_backoff`)"
            ))),
        }
    }
}

impl fmt::Display for BackoffStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackoffStrategy::Fixed => write!(f, "fixed"),
            BackoffStrategy::ExponentialBackoff => write!(f, "exponential_backoff"),
        }
    }
}

/// Validated interval policy for one polling session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackoffPolicy {
    strategy: BackoffStrategy,
    initial: Duration,
    max: Duration,
    factor: f64,
}

impl BackoffPolicy {
    /// Build a policy, rejecting bounds that would break the interval
    /// invariants (`0 < interval <= max`).
    ///
    /// `max` and `factor` are only checked for exponential backoff.
    pub fn new(
        strategy: BackoffStrategy,
        initial: Duration,
        max: Duration,
        factor: f64,
    ) -> Result<Self, PollError> {
        if initial.is_zero() {
            return Err(PollError::InvalidConfiguration(
                "initial interval must be greater than zero".into(),
            ));
        }

        if strategy == BackoffStrategy::ExponentialBackoff {
            if !factor.is_finite() || factor < 1.0 {
                return Err(PollError::InvalidConfiguration(format!(
                    "backoff factor must be a finite number >= 1, got {factor}"
                )));
            }
            if max < initial {
                return Err(PollError::InvalidConfiguration(format!(
                    "max interval ({max:?}) is shorter than the initial interval ({initial:?})"
                )));
            }
        }

        Ok(Self {
            strategy,
            initial,
            max,
            factor,
        })
    }

    pub fn strategy(&self) -> BackoffStrategy {
        self.strategy
    }

    pub fn initial(&self) -> Duration {
        self.initial
    }

    /// Interval to wait after `current`.
    pub fn next(&self, current: Duration) -> Duration {
        match self.strategy {
            BackoffStrategy::Fixed => self.initial,
            BackoffStrategy::ExponentialBackoff => {
                Duration::try_from_secs_f64(current.as_secs_f64() * self.factor)
                    .map_or(self.max, |scaled| scaled.min(self.max))
            }
        }
    }
}
