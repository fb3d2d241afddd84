use std::future::Future;
use std::time::{Duration, Instant};

/// Clock and wait for the blocking poller.
pub trait Suspend {
    fn now(&self) -> Instant;
    fn suspend(&self, duration: Duration);
}

/// Real time; waits block the current thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleep;

impl Suspend for ThreadSleep {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn suspend(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Clock and wait for the cooperative poller.
pub trait AsyncSuspend: Send + Sync {
    fn now(&self) -> Instant;
    fn suspend(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Tokio time; waits yield to the runtime. Honours paused test time.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleep;

impl AsyncSuspend for TokioSleep {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }

    async fn suspend(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
