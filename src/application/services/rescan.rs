//! Debounced rescan scheduling.

use std::time::Duration;

use tokio::time::{Instant, sleep_until};

/// Coalesces bursts of region changes into one rescan.
///
/// Every change pushes the deadline back by `delay`; the rescan fires once
/// the region has been quiet for that long.
#[derive(Debug, Clone)]
pub struct DebouncedRescan {
    delay: Duration,
    deadline: Option<Instant>,
}

impl DebouncedRescan {
    /// Creates scheduler with the given quiet period.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Records a region change.
    pub fn schedule(&mut self) {
        self.deadline = Some(Instant::now() + self.delay);
    }

    /// Returns whether a rescan is due at some point.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Waits for the deadline and clears it. Never completes when nothing is scheduled.
    pub async fn wait(&mut self) {
        match self.deadline {
            Some(deadline) => {
                sleep_until(deadline).await;
                self.deadline = None;
            }
            None => std::future::pending().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_quiet_period() {
        let mut rescan = DebouncedRescan::new(Duration::from_millis(250));
        let start = Instant::now();

        rescan.schedule();
        rescan.wait().await;

        assert!(start.elapsed() >= Duration::from_millis(250));
        assert!(!rescan.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_change_pushes_deadline_back() {
        let mut rescan = DebouncedRescan::new(Duration::from_millis(100));
        let start = Instant::now();

        rescan.schedule();
        tokio::time::advance(Duration::from_millis(60)).await;
        rescan.schedule();
        rescan.wait().await;

        assert!(start.elapsed() >= Duration::from_millis(160));
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_scheduler_never_fires() {
        let mut rescan = DebouncedRescan::new(Duration::from_millis(10));

        let fired = tokio::time::timeout(Duration::from_secs(5), rescan.wait()).await;

        assert!(fired.is_err());
    }
}
