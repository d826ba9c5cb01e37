// ============================================================================
// DELAYED WINNER ANNOUNCEMENT
// ============================================================================

use log::debug;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Schedules the announcement of a spin result after a fixed real-time
/// delay, independently of the animation loop.
#[derive(Debug, Clone, Copy)]
pub struct Announcer {
    delay: Duration,
}

/// Handle to a pending announcement. Dropping it cancels the announcement.
#[derive(Debug)]
pub struct Announcement {
    cancel: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Announcer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Calls `on_fire` with `result` on a background thread once the delay
    /// has elapsed, unless the returned handle is cancelled or dropped first.
    pub fn schedule<F>(&self, result: String, on_fire: F) -> Announcement
    where
        F: FnOnce(String) + Send + 'static,
    {
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();
        let delay = self.delay;
        let handle = thread::spawn(move || match cancel_rx.recv_timeout(delay) {
            Err(RecvTimeoutError::Timeout) => {
                debug!("announcing {result:?}");
                on_fire(result);
            }
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                debug!("announcement of {result:?} cancelled");
            }
        });

        Announcement {
            cancel: Some(cancel_tx),
            handle: Some(handle),
        }
    }
}

impl Announcement {
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
    }

    /// Blocks until the announcement has fired.
    pub fn wait(mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_delay() {
        let (tx, rx) = mpsc::channel();
        let announcer = Announcer::new(Duration::from_millis(10));
        let _pending = announcer.schedule("7".to_string(), move |result| {
            let _ = tx.send(result);
        });
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)), Ok("7".to_string()));
    }

    #[test]
    fn test_wait_blocks_until_fired() {
        let (tx, rx) = mpsc::channel();
        let announcer = Announcer::new(Duration::from_millis(20));
        announcer
            .schedule("winner".to_string(), move |result| {
                let _ = tx.send(result);
            })
            .wait();
        assert_eq!(rx.try_recv(), Ok("winner".to_string()));
    }

    #[test]
    fn test_cancelled_announcement_never_fires() {
        let (tx, rx) = mpsc::channel();
        let announcer = Announcer::new(Duration::from_millis(300));
        let pending = announcer.schedule("3".to_string(), move |result| {
            let _ = tx.send(result);
        });
        pending.cancel();
        assert!(rx.recv_timeout(Duration::from_millis(600)).is_err());
    }

    #[test]
    fn test_dropped_announcement_never_fires() {
        let (tx, rx) = mpsc::channel();
        let announcer = Announcer::new(Duration::from_millis(300));
        drop(announcer.schedule("4".to_string(), move |result| {
            let _ = tx.send(result);
        }));
        assert!(rx.recv_timeout(Duration::from_millis(600)).is_err());
    }
}
