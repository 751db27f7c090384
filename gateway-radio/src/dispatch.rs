//! Bounded dispatch of blocking device calls
//!
//! Transport calls block their thread until the device answers. They run on
//! tokio's blocking pool behind a semaphore so a slow or unreachable device
//! cannot tie up more than a fixed number of threads, and the awaiting task
//! is suspended rather than blocking the executor.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Semaphore;

use crate::config::DEFAULT_MAX_BLOCKING_CALLS;

/// Failure to run a blocking call to completion
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The dispatcher's permit pool has been closed
    #[error("Blocking worker pool is closed")]
    Closed,

    /// The worker panicked or was cancelled
    #[error("Blocking task failed: {0}")]
    Join(String),
}

/// Runs blocking closures on a bounded worker pool
#[derive(Debug, Clone)]
pub struct BlockingDispatcher {
    permits: Arc<Semaphore>,
    max_in_flight: usize,
}

impl BlockingDispatcher {
    /// Create a dispatcher allowing at most `max_in_flight` concurrent calls
    ///
    /// A limit of zero is raised to one.
    pub fn new(max_in_flight: usize) -> Self {
        let max_in_flight = max_in_flight.max(1);
        Self {
            permits: Arc::new(Semaphore::new(max_in_flight)),
            max_in_flight,
        }
    }

    /// Run `func` on the blocking pool and await its result
    pub async fn run<F, T>(&self, func: F) -> Result<T, DispatchError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|_| DispatchError::Closed)?;

        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            func()
        })
        .await
        .map_err(|e| DispatchError::Join(e.to_string()))
    }

    /// Configured concurrency limit
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }

    /// Permits not currently held by a running call
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Refuse all future calls; calls already running finish normally
    pub fn close(&self) {
        self.permits.close();
    }
}

impl Default for BlockingDispatcher {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BLOCKING_CALLS)
    }
}
