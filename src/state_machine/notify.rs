use async_trait::async_trait;

use super::status::JobStatus;

/// A transition between two observed statuses.
///
/// `previous` is `None` for the first observation of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub previous: Option<JobStatus>,
    pub current: JobStatus,
}

/// Synchronous receiver of status changes.
pub trait StatusObserver {
    fn on_status_change(&mut self, change: &StatusChange) -> anyhow::Result<()>;
}

impl<F> StatusObserver for F
where
    F: FnMut(&StatusChange) -> anyhow::Result<()>,
{
    fn on_status_change(&mut self, change: &StatusChange) -> anyhow::Result<()> {
        self(change)
    }
}

/// Receiver of status changes that may itself suspend.
#[async_trait]
pub trait AsyncStatusObserver: Send {
    async fn on_status_change(&mut self, change: &StatusChange) -> anyhow::Result<()>;
}

/// The notification sink a caller hands to a polling session.
pub enum Observer<'a> {
    None,
    Sync(&'a mut (dyn StatusObserver + Send)),
    Async(&'a mut dyn AsyncStatusObserver),
}

impl Observer<'_> {
    pub(crate) async fn notify(&mut self, change: &StatusChange) -> anyhow::Result<()> {
        match self {
            Observer::None => Ok(()),
            Observer::Sync(observer) => observer.on_status_change(change),
            Observer::Async(observer) => observer.on_status_change(change).await,
        }
    }
}

/// Remembers the last observed status and reports when it changes.
#[derive(Debug, Default)]
pub struct ChangeNotifier {
    previous: Option<JobStatus>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the change to report if `current` differs from the last
    /// committed status.
    pub fn detect(&self, current: &JobStatus) -> Option<StatusChange> {
        if self.previous.as_ref() == Some(current) {
            return None;
        }
        Some(StatusChange {
            previous: self.previous.clone(),
            current: current.clone(),
        })
    }

    /// Record `current` as the last observed status. Call only once the
    /// observer for it has returned successfully.
    pub fn commit(&mut self, current: JobStatus) {
        self.previous = Some(current);
    }

    pub fn previous(&self) -> Option<&JobStatus> {
        self.previous.as_ref()
    }
}
