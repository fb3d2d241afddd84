//! Polling drivers.
//!
//! Both drivers run the same [`PollSession`](crate::state_machine::PollSession)
//! decision logic and differ only in how they query, notify and wait:
//! [`JobPoller`] awaits, [`BlockingJobPoller`] blocks the calling thread.

mod blocking;
mod cooperative;
mod suspend;

pub use blocking::BlockingJobPoller;
pub use cooperative::JobPoller;
pub use suspend::{AsyncSuspend, Suspend, ThreadSleep, TokioSleep};
