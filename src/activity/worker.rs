//! Background thread that runs the consumer on an interval.

use std::sync::mpsc::{channel, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{error, info};

use super::{ActivityConsumer, ActivityLogStore};
use crate::bus::Subscriber;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConsumerStats {
    pub runs: usize,
    pub logged: usize,
    pub skipped: usize,
    pub failed_runs: usize,
}

/// Runs [`ActivityConsumer::run_once`] immediately and then every `interval`
/// until stopped.
///
/// ```ignore
/// let worker = ConsumerThread::spawn(consumer, Duration::from_secs(600));
/// // ...
/// let stats = worker.stop();
/// ```
pub struct ConsumerThread {
    stop_tx: Sender<()>,
    handle: Option<JoinHandle<ConsumerStats>>,
}

impl ConsumerThread {
    pub fn spawn<Q, S>(consumer: ActivityConsumer<Q, S>, interval: Duration) -> Self
    where
        Q: Subscriber + 'static,
        S: ActivityLogStore + 'static,
    {
        let (stop_tx, stop_rx) = channel();

        let handle = thread::spawn(move || {
            let mut stats = ConsumerStats::default();
            info!(interval_ms = interval.as_millis() as u64, "activity consumer started");

            loop {
                stats.runs += 1;
                match consumer.run_once() {
                    Ok(result) => {
                        stats.logged += result.logged;
                        stats.skipped += result.skipped;
                    }
                    Err(err) => {
                        stats.failed_runs += 1;
                        error!(error = %err, "activity consumer run failed");
                    }
                }

                match stop_rx.recv_timeout(interval) {
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    Err(RecvTimeoutError::Timeout) => {}
                }
            }

            info!(runs = stats.runs, logged = stats.logged, "activity consumer stopped");
            stats
        });

        Self {
            stop_tx,
            handle: Some(handle),
        }
    }

    /// Signal the thread and wait for it. Returns its stats.
    pub fn stop(mut self) -> ConsumerStats {
        let _ = self.stop_tx.send(());
        self.join()
    }

    /// Block for the lifetime of the thread. Used by the consumer binary.
    pub fn wait(mut self) -> ConsumerStats {
        self.join()
    }

    fn join(&mut self) -> ConsumerStats {
        self.handle
            .take()
            .map(|h| h.join().unwrap_or_default())
            .unwrap_or_default()
    }
}

impl Drop for ConsumerThread {
    fn drop(&mut self) {
        let _ = self.stop_tx.send(());
    }
}
