use std::time::Duration;

use thiserror::Error;

use crate::provider::ProviderError;

/// Every way a polling session can end without observing a terminal status.
#[derive(Debug, Error)]
pub enum PollError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("status query failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("status observer failed: {0:#}")]
    Observer(anyhow::Error),

    #[error("no terminal status after waiting {elapsed:?}")]
    DeadlineExceeded { elapsed: Duration },
}

impl PollError {
    /// Classifies the error for reporting (log fields, exit codes).
    pub fn kind(&self) -> ErrorKind {
        match self {
            PollError::InvalidConfiguration(_) => ErrorKind::InvalidConfiguration,
            PollError::Provider(_) => ErrorKind::Provider,
            PollError::Observer(_) => ErrorKind::Observer,
            PollError::DeadlineExceeded { .. } => ErrorKind::DeadlineExceeded,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidConfiguration,
    Provider,
    Observer,
    DeadlineExceeded,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::InvalidConfiguration => write!(f, "invalid_configuration"),
            ErrorKind::Provider => write!(f, "provider"),
            ErrorKind::Observer => write!(f, "observer"),
            ErrorKind::DeadlineExceeded => write!(f, "deadline_exceeded"),
        }
    }
}
