use std::time::{Duration, Instant};

use super::backoff::BackoffPolicy;
use super::events::{PollEvent, PollEvents};
use super::notify::{ChangeNotifier, StatusChange};
use super::options::PollOptions;
use super::state::{State, Transition};
use super::status::JobStatus;
use crate::error::PollError;

/// Decision logic for one polling session, free of any I/O.
///
/// Drivers call, per iteration:
/// 1. [`begin_attempt`](PollSession::begin_attempt) to check the deadline,
/// 2. the status query,
/// 3. [`observe`](PollSession::observe) and, if it returns a change, the observer,
/// 4. [`commit`](PollSession::commit) to learn whether to wait or finish.
///
/// Any error along the way goes through [`fail`](PollSession::fail).
pub struct PollSession<'e> {
    job_id: String,
    policy: BackoffPolicy,
    events: &'e dyn PollEvents,
    started: Instant,
    deadline: Instant,
    interval: Duration,
    notifier: ChangeNotifier,
    queries: u32,
    state: State,
}

impl<'e> PollSession<'e> {
    /// Validate `options` and open a session at `now`.
    ///
    /// Configuration errors are reported here, before any query is made.
    pub fn start(
        job_id: &str,
        options: &PollOptions,
        events: &'e dyn PollEvents,
        now: Instant,
    ) -> Result<Self, PollError> {
        let validated = options.validate().and_then(|validated| {
            match now.checked_add(validated.max_wait) {
                Some(deadline) => Ok((validated, deadline)),
                None => Err(PollError::InvalidConfiguration(format!(
                    "max_wait of {:?} is too large",
                    validated.max_wait
                ))),
            }
        });
        let (validated, deadline) = match validated {
            Ok(pair) => pair,
            Err(error) => {
                events.record(&PollEvent::Failed {
                    job_id,
                    error: &error,
                    queries: 0,
                    elapsed: Duration::ZERO,
                });
                return Err(error);
            }
        };

        events.record(&PollEvent::Started {
            job_id,
            strategy: validated.policy.strategy(),
            max_wait: validated.max_wait,
        });

        Ok(Self {
            job_id: job_id.to_string(),
            policy: validated.policy,
            events,
            started: now,
            deadline,
            interval: validated.policy.initial(),
            notifier: ChangeNotifier::new(),
            queries: 0,
            state: State::Start,
        })
    }

    /// Check the deadline before a query. Returns the attempt number
    /// (1-based) when a query is due.
    pub fn begin_attempt(&mut self, now: Instant) -> Result<u32, PollError> {
        debug_assert!(!self.state.is_final(), "attempt on a finished session");
        if now >= self.deadline {
            self.state = State::TimedOut;
            let error = PollError::DeadlineExceeded {
                elapsed: now.saturating_duration_since(self.started),
            };
            self.report_failure(&error, now);
            return Err(error);
        }
        self.state = State::Polling;
        self.queries += 1;
        Ok(self.queries)
    }

    /// Record a freshly queried status and return the change the observer
    /// must be told about, if any.
    pub fn observe(&self, status: &JobStatus) -> Option<StatusChange> {
        self.events.record(&PollEvent::Queried {
            job_id: &self.job_id,
            attempt: self.queries,
            status,
        });
        let change = self.notifier.detect(status);
        if let Some(change) = &change {
            self.events.record(&PollEvent::Changed {
                job_id: &self.job_id,
                change,
            });
        }
        change
    }

    /// Commit `status` as the last observed value and decide what happens next.
    ///
    /// Must only be called after the observer (if any) returned successfully.
    pub fn commit(&mut self, status: JobStatus, now: Instant) -> Transition {
        self.notifier.commit(status.clone());

        if status.is_terminal() {
            self.state = State::Terminal(status.clone());
            self.events.record(&PollEvent::Finished {
                job_id: &self.job_id,
                status: &status,
                queries: self.queries,
                elapsed: now.saturating_duration_since(self.started),
            });
            return Transition::Finish(status);
        }

        // Never sleep past the deadline; the next attempt reports the timeout.
        let wait = self
            .interval
            .min(self.deadline.saturating_duration_since(now));
        self.interval = self.policy.next(self.interval);
        self.events.record(&PollEvent::Waiting {
            job_id: &self.job_id,
            interval: wait,
        });
        Transition::Wait(wait)
    }

    /// Mark the session failed with `error` and hand the error back.
    pub fn fail(&mut self, error: PollError, now: Instant) -> PollError {
        self.state = State::Failed;
        self.report_failure(&error, now);
        error
    }

    fn report_failure(&self, error: &PollError, now: Instant) {
        self.events.record(&PollEvent::Failed {
            job_id: &self.job_id,
            error,
            queries: self.queries,
            elapsed: now.saturating_duration_since(self.started),
        });
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn queries(&self) -> u32 {
        self.queries
    }

    /// Interval the next wait will use, before deadline clamping.
    pub fn current_interval(&self) -> Duration {
        self.interval
    }

    pub fn previous_status(&self) -> Option<&JobStatus> {
        self.notifier.previous()
    }
}
