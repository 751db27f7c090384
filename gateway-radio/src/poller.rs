//! Periodic polling of a gateway radio
//!
//! Stands in for the host scheduler: refreshes the entity every scan
//! interval and publishes the result. Shutdown is cooperative; a refresh
//! that is already running is allowed to finish.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, Notify};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::entity::Entity;
use crate::radio::GatewayRadio;

/// A radio shared between the poller and command callers
pub type SharedRadio = Arc<Mutex<GatewayRadio>>;

/// A background polling loop for one radio
#[derive(Debug)]
pub struct PollingTask {
    interval: Duration,
    task_handle: JoinHandle<()>,
    shutdown_signal: Arc<AtomicBool>,
    wake: Arc<Notify>,
    poll_count: Arc<AtomicU64>,
}

impl PollingTask {
    /// Spawn the loop; the first poll happens one `interval` from now
    pub fn start(radio: SharedRadio, interval: Duration) -> Self {
        let shutdown_signal = Arc::new(AtomicBool::new(false));
        let wake = Arc::new(Notify::new());
        let poll_count = Arc::new(AtomicU64::new(0));

        let task_handle = tokio::spawn(Self::polling_loop(
            radio,
            interval,
            Arc::clone(&shutdown_signal),
            Arc::clone(&wake),
            Arc::clone(&poll_count),
        ));

        Self {
            interval,
            task_handle,
            shutdown_signal,
            wake,
            poll_count,
        }
    }

    async fn polling_loop(
        radio: SharedRadio,
        interval: Duration,
        shutdown_signal: Arc<AtomicBool>,
        wake: Arc<Notify>,
        poll_count: Arc<AtomicU64>,
    ) {
        info!("Starting polling task (interval: {:?})", interval);

        loop {
            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                _ = wake.notified() => {}
            }

            if shutdown_signal.load(Ordering::Acquire) {
                break;
            }

            let mut entity = radio.lock().await;
            entity.refresh().await;
            entity.publish_state();
            let polls = poll_count.fetch_add(1, Ordering::AcqRel) + 1;
            debug!("Poll {} of {} complete", polls, entity.name());
        }

        info!("Polling task ended");
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of completed refreshes
    pub fn poll_count(&self) -> u64 {
        self.poll_count.load(Ordering::Acquire)
    }

    /// Check if the task is still running
    pub fn is_running(&self) -> bool {
        !self.task_handle.is_finished()
    }

    /// Stop polling and wait for the loop to exit
    pub async fn stop(self) {
        self.shutdown_signal.store(true, Ordering::Release);
        self.wake.notify_one();
        if let Err(e) = self.task_handle.await {
            tracing::warn!("Polling task did not exit cleanly: {}", e);
        }
    }
}
