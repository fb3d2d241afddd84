use std::time::Duration;

use anyhow::{Result, bail};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// How long a simulated job stays `pending`, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum DelayModel {
    Fixed {
        #[serde(default = "default_delay")]
        delay: f64,
    },
    Uniform {
        #[serde(default = "default_min_delay")]
        min_delay: f64,
        #[serde(default = "default_max_delay")]
        max_delay: f64,
    },
    /// Normal distribution truncated at zero.
    Gaussian {
        #[serde(default = "default_mean_delay")]
        mean_delay: f64,
        #[serde(default = "default_stddev_delay")]
        stddev_delay: f64,
    },
}

fn default_delay() -> f64 {
    20.0
}

fn default_min_delay() -> f64 {
    15.0
}

fn default_max_delay() -> f64 {
    30.0
}

fn default_mean_delay() -> f64 {
    10.0
}

fn default_stddev_delay() -> f64 {
    2.0
}

impl Default for DelayModel {
    fn default() -> Self {
        DelayModel::Uniform {
            min_delay: default_min_delay(),
            max_delay: default_max_delay(),
        }
    }
}

impl DelayModel {
    pub fn validate(&self) -> Result<()> {
        match *self {
            DelayModel::Fixed { delay } => check_non_negative("delay", delay),
            DelayModel::Uniform {
                min_delay,
                max_delay,
            } => {
                check_non_negative("min_delay", min_delay)?;
                check_non_negative("max_delay", max_delay)?;
                if min_delay > max_delay {
                    bail!("min_delay ({min_delay}) is greater than max_delay ({max_delay})");
                }
                if !(max_delay - min_delay).is_finite() {
                    bail!("delay range {min_delay}..={max_delay} is too wide");
                }
                Ok(())
            }
            DelayModel::Gaussian {
                mean_delay,
                stddev_delay,
            } => {
                check_finite("mean_delay", mean_delay)?;
                check_non_negative("stddev_delay", stddev_delay)
            }
        }
    }

    /// Draw one delay. Assumes the model was validated.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let secs = match *self {
            DelayModel::Fixed { delay } => delay,
            DelayModel::Uniform {
                min_delay,
                max_delay,
            } => rng.gen_range(min_delay..=max_delay),
            DelayModel::Gaussian {
                mean_delay,
                stddev_delay,
            } => gaussian(rng, mean_delay, stddev_delay),
        };
        Duration::try_from_secs_f64(secs.max(0.0)).unwrap_or(Duration::MAX)
    }
}

/// How likely a simulated status query is to answer `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum ErrorModel {
    Fixed {
        #[serde(default)]
        probability: f64,
    },
    Uniform {
        #[serde(default = "default_min_probability")]
        min_probability: f64,
        #[serde(default = "default_max_probability")]
        max_probability: f64,
    },
    /// Normal distribution clamped to `[0, 1]`.
    Gaussian {
        #[serde(default = "default_mean_probability")]
        mean_probability: f64,
        #[serde(default = "default_stddev_probability")]
        stddev_probability: f64,
    },
}

fn default_min_probability() -> f64 {
    0.05
}

fn default_max_probability() -> f64 {
    0.15
}

fn default_mean_probability() -> f64 {
    0.1
}

fn default_stddev_probability() -> f64 {
    0.02
}

impl Default for ErrorModel {
    fn default() -> Self {
        ErrorModel::Fixed { probability: 0.0 }
    }
}

impl ErrorModel {
    pub fn validate(&self) -> Result<()> {
        match *self {
            ErrorModel::Fixed { probability } => check_probability("probability", probability),
            ErrorModel::Uniform {
                min_probability,
                max_probability,
            } => {
                check_probability("min_probability", min_probability)?;
                check_probability("max_probability", max_probability)?;
                if min_probability > max_probability {
                    bail!(
                        "min_probability ({min_probability}) is greater than max_probability ({max_probability})"
                    );
                }
                Ok(())
            }
            ErrorModel::Gaussian {
                mean_probability,
                stddev_probability,
            } => {
                check_finite("mean_probability", mean_probability)?;
                check_non_negative("stddev_probability", stddev_probability)
            }
        }
    }

    /// Draw the error probability for one query.
    pub fn probability<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let p = match *self {
            ErrorModel::Fixed { probability } => probability,
            ErrorModel::Uniform {
                min_probability,
                max_probability,
            } => rng.gen_range(min_probability..=max_probability),
            ErrorModel::Gaussian {
                mean_probability,
                stddev_probability,
            } => gaussian(rng, mean_probability, stddev_probability),
        };
        p.clamp(0.0, 1.0)
    }

    /// Whether this query fails.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        let p = self.probability(rng);
        rng.gen_bool(p)
    }
}

fn gaussian<R: Rng + ?Sized>(rng: &mut R, mean: f64, stddev: f64) -> f64 {
    match Normal::new(mean, stddev) {
        Ok(normal) => normal.sample(rng),
        Err(_) => mean,
    }
}

fn check_finite(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        bail!("{name} must be finite, got {value}");
    }
    Ok(())
}

fn check_non_negative(name: &str, value: f64) -> Result<()> {
    check_finite(name, value)?;
    if value < 0.0 {
        bail!("{name} must not be negative, got {value}");
    }
    Ok(())
}

fn check_probability(name: &str, value: f64) -> Result<()> {
    check_finite(name, value)?;
    if !(0.0..=1.0).contains(&value) {
        bail!("{name} must be within [0, 1], got {value}");
    }
    Ok(())
}
