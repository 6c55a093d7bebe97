//! Countdown scheduling for the host event loop.
//!
//! The ticker is armed for one engine epoch. Once the engine moves on (new
//! question, pause, game end) its epoch changes, and a tick that was
//! scheduled for the old epoch is dropped instead of delivered.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
struct Armed {
    epoch: u64,
    due: Instant,
}

#[derive(Debug)]
pub struct Ticker {
    interval: Duration,
    armed: Option<Armed>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            armed: None,
        }
    }

    /// Schedule the first tick one interval after `now`, bound to `epoch`.
    /// Replaces any pending tick.
    pub fn arm(&mut self, now: Instant, epoch: u64) {
        self.armed = Some(Armed {
            epoch,
            due: now + self.interval,
        });
    }

    pub fn cancel(&mut self) {
        self.armed = None;
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Returns `true` when a tick is due for `epoch`, and schedules the
    /// following one. A pending tick bound to another epoch is cancelled.
    pub fn poll(&mut self, now: Instant, epoch: u64) -> bool {
        let Some(armed) = self.armed.as_mut() else {
            return false;
        };

        if armed.epoch != epoch {
            self.armed = None;
            return false;
        }

        if now < armed.due {
            return false;
        }

        armed.due += self.interval;
        true
    }

    /// How long the event loop may block before the next tick is due.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.armed
            .map(|armed| armed.due.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn fires_once_per_interval() {
        let start = Instant::now();
        let mut ticker = Ticker::new(SECOND);
        ticker.arm(start, 1);

        assert!(!ticker.poll(start + Duration::from_millis(999), 1));
        assert!(ticker.poll(start + SECOND, 1));
        assert!(!ticker.poll(start + Duration::from_millis(1500), 1));
        assert!(ticker.poll(start + 2 * SECOND, 1));
    }

    #[test]
    fn stale_epoch_never_fires() {
        let start = Instant::now();
        let mut ticker = Ticker::new(SECOND);
        ticker.arm(start, 4);

        assert!(!ticker.poll(start + 5 * SECOND, 5));
        assert!(!ticker.is_armed());
        assert!(!ticker.poll(start + 6 * SECOND, 4));
    }

    #[test]
    fn cancel_drops_the_pending_tick() {
        let start = Instant::now();
        let mut ticker = Ticker::new(SECOND);
        ticker.arm(start, 1);
        ticker.cancel();

        assert!(!ticker.poll(start + 3 * SECOND, 1));
        assert_eq!(ticker.time_until_due(start), None);
    }

    #[test]
    fn rearm_restarts_the_interval() {
        let start = Instant::now();
        let mut ticker = Ticker::new(SECOND);
        ticker.arm(start, 1);
        ticker.arm(start + Duration::from_millis(800), 2);

        assert!(!ticker.poll(start + SECOND, 2));
        assert!(ticker.poll(start + Duration::from_millis(1800), 2));
        assert_eq!(
            ticker.time_until_due(start + Duration::from_millis(1800)),
            Some(SECOND)
        );
    }
}
