//! Fixed-period timer for background fetches.

use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

const MIN_PERIOD: Duration = Duration::from_secs(1);

/// Repeating timer whose first tick fires one full period after creation.
///
/// Must be created inside a tokio runtime.
#[derive(Debug)]
pub struct SyncSchedule {
    interval: Interval,
    period: Duration,
}

impl SyncSchedule {
    /// Creates a schedule; periods below one second are clamped up.
    pub fn new(period: Duration) -> Self {
        let period = period.max(MIN_PERIOD);
        let mut interval = interval_at(Instant::now() + period, period);
        // Slow fetches push later ticks back instead of bursting to catch up.
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval, period }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Waits for the next tick.
    pub async fn tick(&mut self) {
        self.interval.tick().await;
    }
}
