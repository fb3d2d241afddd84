use std::sync::Arc;

use super::suspend::{Suspend, ThreadSleep};
use crate::error::PollError;
use crate::provider::BlockingStatusQuery;
use crate::state_machine::{
    JobStatus, PollEvents, PollOptions, PollSession, StatusObserver, TracingEvents, Transition,
};

/// Polls one job on the calling thread.
pub struct BlockingJobPoller<Q, S = ThreadSleep> {
    query: Q,
    suspend: S,
    options: PollOptions,
    events: Arc<dyn PollEvents>,
}

impl<Q: BlockingStatusQuery> BlockingJobPoller<Q> {
    pub fn new(query: Q, options: PollOptions) -> Self {
        Self {
            query,
            suspend: ThreadSleep,
            options,
            events: Arc::new(TracingEvents),
        }
    }
}

impl<Q: BlockingStatusQuery, S: Suspend> BlockingJobPoller<Q, S> {
    pub fn with_suspend<T: Suspend>(self, suspend: T) -> BlockingJobPoller<Q, T> {
        BlockingJobPoller {
            query: self.query,
            suspend,
            options: self.options,
            events: self.events,
        }
    }

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

    /// Blocking counterpart of [`JobPoller::poll_status`](super::JobPoller::poll_status).
    ///
    /// An in-flight query is never interrupted; the deadline is only checked
    /// between iterations.
    pub fn poll_status(
        &self,
        job_id: &str,
        mut observer: Option<&mut dyn StatusObserver>,
    ) -> Result<JobStatus, PollError> {
        let mut session =
            PollSession::start(job_id, &self.options, self.events.as_ref(), self.suspend.now())?;

        loop {
            session.begin_attempt(self.suspend.now())?;

            let status = match self.query.query(job_id) {
                Ok(status) => status,
                Err(e) => return Err(session.fail(e.into(), self.suspend.now())),
            };

            if let Some(change) = session.observe(&status)
                && let Some(observer) = observer.as_deref_mut()
                && let Err(e) = observer.on_status_change(&change)
            {
                return Err(session.fail(PollError::Observer(e), self.suspend.now()));
            }

            match session.commit(status, self.suspend.now()) {
                Transition::Finish(status) => return Ok(status),
                Transition::Wait(wait) => self.suspend.suspend(wait),
            }
        }
    }
}
