//! Tick sources.
//!
//! A tick source is armed while a session runs and cancelled on pause or
//! stop. The owner of the session awaits ticks and applies each one before
//! waiting for the next, so ticks can never overlap.

use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior};

/// Cancellable periodic scheduler delivering one tick per period.
pub trait TickSource {
    /// Begin delivering ticks. Arming an armed source is a no-op.
    fn arm(&mut self);

    /// Stop delivering ticks. No tick is delivered after this returns.
    fn cancel(&mut self);

    fn is_armed(&self) -> bool;
}

/// A tick source driven by the host calling `tick()` itself.
///
/// Only tracks the armed flag, which is all tests and embedders need.
#[derive(Debug, Default, Clone)]
pub struct ManualTicker {
    armed: bool,
    arm_count: u32,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times the source went from cancelled to armed.
    pub fn arm_count(&self) -> u32 {
        self.arm_count
    }
}

impl TickSource for ManualTicker {
    fn arm(&mut self) {
        if !self.armed {
            self.armed = true;
            self.arm_count += 1;
        }
    }

    fn cancel(&mut self) {
        self.armed = false;
    }

    fn is_armed(&self) -> bool {
        self.armed
    }
}

/// Wall-clock tick source backed by a tokio interval.
///
/// The first tick arrives one full period after arming. Late ticks are
/// delayed rather than delivered in a burst, so at most one tick is
/// delivered per nominal period.
#[derive(Debug)]
pub struct IntervalTicker {
    period: Duration,
    interval: Option<Interval>,
}

impl IntervalTicker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    pub fn every_second() -> Self {
        Self::new(Duration::from_secs(1))
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Wait for the next tick. Never resolves while cancelled, which makes
    /// it safe to use as one branch of `tokio::select!`.
    pub async fn next_tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

impl TickSource for IntervalTicker {
    fn arm(&mut self) {
        if self.interval.is_some() {
            return;
        }
        let mut interval = tokio::time::interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
    }

    fn cancel(&mut self) {
        self.interval = None;
    }

    fn is_armed(&self) -> bool {
        self.interval.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_ticker_counts_arms() {
        let mut ticker = ManualTicker::new();
        assert!(!ticker.is_armed());
        ticker.arm();
        ticker.arm();
        assert!(ticker.is_armed());
        assert_eq!(ticker.arm_count(), 1);
        ticker.cancel();
        assert!(!ticker.is_armed());
        ticker.arm();
        assert_eq!(ticker.arm_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn interval_ticker_waits_a_full_period() {
        let mut ticker = IntervalTicker::every_second();
        ticker.arm();
        let start = Instant::now();
        ticker.next_tick().await;
        assert!(start.elapsed() >= Duration::from_secs(1));
        ticker.next_tick().await;
        assert!(start.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_ticker_never_fires() {
        let mut ticker = IntervalTicker::every_second();
        ticker.arm();
        ticker.cancel();
        let fired = tokio::time::timeout(Duration::from_secs(5), ticker.next_tick()).await;
        assert!(fired.is_err());
    }
}
