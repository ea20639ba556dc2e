//! Simulated progress indicator
//!
//! The ticker is cosmetic: it advances the session progress on a fixed
//! interval and knows nothing about the request it accompanies.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::session::SessionCell;

/// Ticker settings
#[derive(Debug, Clone, Copy)]
pub struct ProgressSettings {
    pub interval: Duration,
    pub step: u8,
    pub ceiling: u8,
}

impl Default for ProgressSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(300),
            step: 10,
            ceiling: 90,
        }
    }
}

/// Repeating progress timer; aborted on [`stop`](Self::stop) or drop
pub(crate) struct ProgressTicker {
    handle: JoinHandle<()>,
}

impl ProgressTicker {
    pub(crate) fn start(cell: Arc<SessionCell>, settings: ProgressSettings) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + settings.interval, settings.interval);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticks.tick().await;
                cell.update(|s| s.advance(settings.step, settings.ceiling));
            }
        });

        Self { handle }
    }

    pub(crate) fn stop(self) {
        // Drop aborts the task
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_ticker_advances_to_ceiling() {
        let cell = Arc::new(SessionCell::new());
        let ticker = ProgressTicker::start(cell.clone(), ProgressSettings::default());

        tokio::time::sleep(Duration::from_millis(650)).await;
        assert_eq!(cell.read(|s| s.progress), 20);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(cell.read(|s| s.progress), 90);

        ticker.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_ticker_no_longer_advances() {
        let cell = Arc::new(SessionCell::new());
        let ticker = ProgressTicker::start(cell.clone(), ProgressSettings::default());

        tokio::time::sleep(Duration::from_millis(350)).await;
        ticker.stop();
        let frozen = cell.read(|s| s.progress);

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(cell.read(|s| s.progress), frozen);
    }
}
