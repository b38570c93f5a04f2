//! Scheduled waits for the poll chain.

use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;

/// Delay source for rescheduling. Production code uses tokio's clock; tests
/// substitute a timer that records delays and returns immediately.
#[async_trait]
pub trait Timer: Send + Sync {
    async fn sleep(&self, delay: Duration);
}

pub struct TokioTimer;

#[async_trait]
impl Timer for TokioTimer {
    async fn sleep(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

/// Handle to a spawned poll chain.
///
/// Dropping the handle detaches the chain; it keeps running until it reaches
/// a terminal state or its view reports itself detached. Starting another
/// chain does not cancel this one.
pub struct PollHandle<T> {
    task: JoinHandle<T>,
}

impl<T> PollHandle<T> {
    pub(crate) fn new(task: JoinHandle<T>) -> Self {
        Self { task }
    }

    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the chain to settle. `None` when it was cancelled.
    pub async fn join(self) -> Option<T> {
        self.task.await.ok()
    }
}
