use std::fmt;

use super::status::JobStatus;

/// The states a polling session moves through.
///
/// Each session flows: START → POLLING → TERMINAL | TIMED_OUT | FAILED
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    Start,
    Polling,
    Terminal(JobStatus),
    TimedOut,
    Failed,
}

impl State {
    /// Whether the session has stopped for good.
    pub fn is_final(&self) -> bool {
        matches!(self, State::Terminal(_) | State::TimedOut | State::Failed)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Start => write!(f, "START"),
            State::Polling => write!(f, "POLLING"),
            State::Terminal(status) => write!(f, "TERMINAL({status})"),
            State::TimedOut => write!(f, "TIMED_OUT"),
            State::Failed => write!(f, "FAILED"),
        }
    }
}

/// What the driver must do after an observation has been committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Suspend for the given duration, then query again.
    Wait(std::time::Duration),
    /// A terminal status was observed; return it.
    Finish(JobStatus),
}
