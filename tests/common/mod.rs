#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use jobpoll::poller::{AsyncSuspend, Suspend};
use jobpoll::provider::{BlockingStatusQuery, StatusQuery};
use jobpoll::{JobStatus, ProviderError, StatusChange, StatusObserver};

pub fn secs(s: u64) -> Duration {
    Duration::from_secs(s)
}

/// One scripted provider answer.
#[derive(Debug, Clone)]
pub enum Reply {
    Status(JobStatus),
    Unavailable,
    TimedOut,
}

impl Reply {
    fn into_result(self) -> Result<JobStatus, ProviderError> {
        match self {
            Reply::Status(status) => Ok(status),
            Reply::Unavailable => Err(ProviderError::ApiError {
                status: 503,
                message: "unavailable".into(),
            }),
            Reply::TimedOut => Err(ProviderError::Timeout(secs(5))),
        }
    }
}

/// Answers from a fixed list, one per call; the last answer repeats.
#[derive(Debug, Default)]
pub struct Scripted {
    replies: Vec<Reply>,
    calls: AtomicU32,
}

impl Scripted {
    pub fn new(replies: Vec<Reply>) -> Self {
        assert!(!replies.is_empty());
        Self {
            replies,
            calls: AtomicU32::new(0),
        }
    }

    pub fn statuses(statuses: &[JobStatus]) -> Self {
        Self::new(statuses.iter().cloned().map(Reply::Status).collect())
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    fn next(&self) -> Result<JobStatus, ProviderError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) as usize;
        let idx = n.min(self.replies.len() - 1);
        self.replies[idx].clone().into_result()
    }
}

impl StatusQuery for Scripted {
    async fn query(&self, _job_id: &str) -> Result<JobStatus, ProviderError> {
        self.next()
    }
}

impl BlockingStatusQuery for Scripted {
    fn query(&self, _job_id: &str) -> Result<JobStatus, ProviderError> {
        self.next()
    }
}

/// Collects every change it is told about.
#[derive(Debug, Default)]
pub struct Recorder {
    pub seen: Vec<JobStatus>,
}

impl StatusObserver for Recorder {
    fn on_status_change(&mut self, change: &StatusChange) -> anyhow::Result<()> {
        self.seen.push(change.current.clone());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Cooperative model helpers (tokio paused time)
// ---------------------------------------------------------------------------

/// `pending` until `pending_for` has elapsed since creation, then `terminal`.
/// Records the elapsed time of every query.
pub struct TimedProvider {
    start: tokio::time::Instant,
    pending_for: Duration,
    terminal: JobStatus,
    pub query_times: Mutex<Vec<Duration>>,
}

impl TimedProvider {
    pub fn new(pending_for: Duration, terminal: JobStatus) -> Self {
        Self {
            start: tokio::time::Instant::now(),
            pending_for,
            terminal,
            query_times: Mutex::new(Vec::new()),
        }
    }

    pub fn query_times(&self) -> Vec<Duration> {
        self.query_times.lock().unwrap().clone()
    }
}

impl StatusQuery for TimedProvider {
    async fn query(&self, _job_id: &str) -> Result<JobStatus, ProviderError> {
        let elapsed = self.start.elapsed();
        self.query_times.lock().unwrap().push(elapsed);
        if elapsed < self.pending_for {
            Ok(JobStatus::Pending)
        } else {
            Ok(self.terminal.clone())
        }
    }
}

/// Tokio sleep that remembers every requested wait.
#[derive(Debug, Clone, Default)]
pub struct RecordingSleep {
    pub waits: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleep {
    pub fn waits(&self) -> Vec<Duration> {
        self.waits.lock().unwrap().clone()
    }
}

impl AsyncSuspend for RecordingSleep {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }

    async fn suspend(&self, duration: Duration) {
        self.waits.lock().unwrap().push(duration);
        tokio::time::sleep(duration).await;
    }
}

// ---------------------------------------------------------------------------
// Blocking model helpers (virtual clock)
// ---------------------------------------------------------------------------

/// A clock that only moves when the poller waits.
#[derive(Debug)]
pub struct VirtualClock {
    origin: Instant,
    offset: Cell<Duration>,
    waits: RefCell<Vec<Duration>>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Cell::new(Duration::ZERO),
            waits: RefCell::new(Vec::new()),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.offset.get()
    }

    pub fn waits(&self) -> Vec<Duration> {
        self.waits.borrow().clone()
    }
}

impl Suspend for &VirtualClock {
    fn now(&self) -> Instant {
        self.origin + self.offset.get()
    }

    fn suspend(&self, duration: Duration) {
        self.offset.set(self.offset.get() + duration);
        self.waits.borrow_mut().push(duration);
    }
}

/// Blocking counterpart of [`TimedProvider`], driven by a [`VirtualClock`].
pub struct VirtualTimedProvider<'a> {
    clock: &'a VirtualClock,
    pending_for: Duration,
    terminal: JobStatus,
    pub query_times: RefCell<Vec<Duration>>,
}

impl<'a> VirtualTimedProvider<'a> {
    pub fn new(clock: &'a VirtualClock, pending_for: Duration, terminal: JobStatus) -> Self {
        Self {
            clock,
            pending_for,
            terminal,
            query_times: RefCell::new(Vec::new()),
        }
    }

    pub fn query_times(&self) -> Vec<Duration> {
        self.query_times.borrow().clone()
    }
}

impl BlockingStatusQuery for VirtualTimedProvider<'_> {
    fn query(&self, _job_id: &str) -> Result<JobStatus, ProviderError> {
        let elapsed = self.clock.elapsed();
        self.query_times.borrow_mut().push(elapsed);
        if elapsed < self.pending_for {
            Ok(JobStatus::Pending)
        } else {
            Ok(self.terminal.clone())
        }
    }
}
