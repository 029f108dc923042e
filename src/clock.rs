use std::time::{Duration, Instant};

use crate::config::MIN_TICK_INTERVAL_MS;

/// Fixed-interval tick scheduler driven by the frame loop.
///
/// The clock never fires by itself; the loop asks it with [`TickClock::poll`]
/// whether the next simulation step is due.
#[derive(Debug, Clone)]
pub struct TickClock {
    interval: Duration,
    last_tick: Instant,
    paused: bool,
}

impl TickClock {
    /// Creates a clock armed at `now`. Intervals below
    /// [`MIN_TICK_INTERVAL_MS`] are clamped.
    #[must_use]
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(MIN_TICK_INTERVAL_MS)),
            last_tick: now,
            paused: false,
        }
    }

    /// Returns true when a tick is due, re-arming the clock from `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.paused || now.saturating_duration_since(self.last_tick) < self.interval {
            return false;
        }

        self.last_tick = now;
        true
    }

    /// Time left until the next tick, or `None` while paused.
    #[must_use]
    pub fn until_next(&self, now: Instant) -> Option<Duration> {
        if self.paused {
            return None;
        }

        let elapsed = now.saturating_duration_since(self.last_tick);
        Some(self.interval.saturating_sub(elapsed))
    }

    /// Re-arms the clock so the next tick is a full interval away.
    pub fn reset(&mut self, now: Instant) {
        self.last_tick = now;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resumes ticking; the first tick comes a full interval after `now`.
    pub fn resume(&mut self, now: Instant) {
        self.paused = false;
        self.last_tick = now;
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }
}
