use std::sync::Arc;

use super::suspend::{AsyncSuspend, TokioSleep};
use crate::error::PollError;
use crate::provider::StatusQuery;
use crate::state_machine::{
    JobStatus, Observer, PollEvents, PollOptions, PollSession, TracingEvents, Transition,
};

/// Polls one job at a time as a single async task.
pub struct JobPoller<Q, S = TokioSleep> {
    query: Q,
    suspend: S,
    options: PollOptions,
    events: Arc<dyn PollEvents>,
}

impl<Q: StatusQuery> JobPoller<Q> {
    pub fn new(query: Q, options: PollOptions) -> Self {
        Self {
            query,
            suspend: TokioSleep,
            options,
            events: Arc::new(TracingEvents),
        }
    }
}

impl<Q: StatusQuery, S: AsyncSuspend> JobPoller<Q, S> {
    /// Replace the clock/wait used between queries.
    pub fn with_suspend<T: AsyncSuspend>(self, suspend: T) -> JobPoller<Q, T> {
        JobPoller {
            query: self.query,
            suspend,
            options: self.options,
            events: self.events,
        }
    }

    /// Replace the event sink (defaults to [`TracingEvents`]).
    pub fn with_events(mut self, events: Arc<dyn PollEvents>) -> Self {
        self.events = events;
        self
    }

    pub fn options(&self) -> &PollOptions {
        &self.options
    }

    pub fn query(&self) -> &Q {
        &self.query
    }

    /// Poll `job_id` until it reaches a terminal status or the deadline passes.
    ///
    /// A terminal `Error` status is returned as `Ok`. The observer sees each
    /// distinct status once, in order, before the poller waits again.
    pub async fn poll_status(
        &self,
        job_id: &str,
        mut observer: Observer<'_>,
    ) -> Result<JobStatus, PollError> {
        let mut session =
            PollSession::start(job_id, &self.options, self.events.as_ref(), self.suspend.now())?;

        loop {
            session.begin_attempt(self.suspend.now())?;

            let status = match self.query.query(job_id).await {
                Ok(status) => status,
                Err(e) => return Err(session.fail(e.into(), self.suspend.now())),
            };

            if let Some(change) = session.observe(&status)
                && let Err(e) = observer.notify(&change).await
            {
                return Err(session.fail(PollError::Observer(e), self.suspend.now()));
            }

            match session.commit(status, self.suspend.now()) {
                Transition::Finish(status) => return Ok(status),
                Transition::Wait(wait) => self.suspend.suspend(wait).await,
            }
        }
    }
}
