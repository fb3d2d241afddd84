//! Adaptive status polling for long-running remote jobs.
//!
//! A [`JobPoller`] (async) or [`BlockingJobPoller`] repeatedly queries a
//! status endpoint until the job reports `completed` or `error`, adapting the
//! wait between queries with a fixed or exponential backoff and telling an
//! observer about every status change exactly once.
//!
//! ```no_run
//! use std::time::Duration;
//! use jobpoll::{JobPoller, Observer, PollOptions, StatusClient};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = StatusClient::new("http://127.0.0.1:5000", Duration::from_secs(5))?;
//! let options = PollOptions::fixed(Duration::from_secs(60), Duration::from_secs(5));
//! let poller = JobPoller::new(client, options);
//!
//! let mut print = |change: &jobpoll::StatusChange| -> anyhow::Result<()> {
//!     println!("status changed to {}", change.current);
//!     Ok(())
//! };
//! let status = poller.poll_status("job-1", Observer::Sync(&mut print)).await?;
//! println!("final status: {status}");
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod poller;
pub mod provider;
pub mod simulator;
pub mod state_machine;
pub mod ui;

pub use error::{ErrorKind, PollError};
pub use poller::{BlockingJobPoller, JobPoller};
pub use provider::{BlockingStatusClient, ProviderError, StatusClient};
pub use state_machine::{
    AsyncStatusObserver, BackoffStrategy, JobStatus, Observer, PollOptions, StatusChange,
    StatusObserver,
};
