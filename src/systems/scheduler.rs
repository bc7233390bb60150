//! Tick rate limiting
//!
//! Decides, from wall-clock readings, whether a simulation tick is due. The
//! overshoot past each interval is carried into the next one instead of
//! being dropped, so the average rate does not drift below the cap. A long
//! stall produces a single tick rather than a burst of catch-up ticks.

use std::time::{Duration, Instant};

/// Upper bound accepted by [`TickScheduler::set_max_ticks_per_second`]
pub const MAX_TICKS_PER_SECOND: u32 = 480;

/// Caps ticks to a maximum rate
#[derive(Debug, Clone)]
pub struct TickScheduler {
    max_ticks_per_second: u32,
    interval: Option<Duration>,
    last_tick: Option<Instant>,
}

impl TickScheduler {
    /// Create a scheduler allowing `max_ticks_per_second` ticks (0 = uncapped)
    pub fn new(max_ticks_per_second: u32) -> Self {
        let mut scheduler = Self {
            max_ticks_per_second: 0,
            interval: None,
            last_tick: None,
        };
        scheduler.set_max_ticks_per_second(max_ticks_per_second);
        scheduler
    }

    /// A scheduler that is always due
    pub fn uncapped() -> Self {
        Self::new(0)
    }

    pub fn max_ticks_per_second(&self) -> u32 {
        self.max_ticks_per_second
    }

    /// Change the cap, clamped to [`MAX_TICKS_PER_SECOND`]; keeps the tick phase
    pub fn set_max_ticks_per_second(&mut self, max_ticks_per_second: u32) {
        self.max_ticks_per_second = max_ticks_per_second.min(MAX_TICKS_PER_SECOND);
        self.interval = match self.max_ticks_per_second {
            0 => None,
            tps => Some(Duration::from_secs(1) / tps),
        };
    }

    /// Forget the last tick; the next poll is due immediately
    pub fn reset(&mut self) {
        self.last_tick = None;
    }

    /// Returns true when a tick should run at `now`
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(interval) = self.interval else {
            self.last_tick = Some(now);
            return true;
        };
        let Some(last) = self.last_tick else {
            self.last_tick = Some(now);
            return true;
        };

        let elapsed = now.saturating_duration_since(last);
        if elapsed < interval {
            return false;
        }

        // Carry the remainder (less than one interval) into the next period.
        let remainder = elapsed.as_nanos() % interval.as_nanos();
        self.last_tick = Some(now - Duration::from_nanos(remainder as u64));
        true
    }

    /// Time left until the next tick is due (zero when due now)
    pub fn time_until_next(&self, now: Instant) -> Duration {
        match (self.interval, self.last_tick) {
            (Some(interval), Some(last)) => {
                interval.saturating_sub(now.saturating_duration_since(last))
            }
            _ => Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_first_poll_is_due() {
        let mut scheduler = TickScheduler::new(10);
        assert!(scheduler.poll(Instant::now()));
    }

    #[test]
    fn test_skips_until_interval_elapsed() {
        let t0 = Instant::now();
        let mut scheduler = TickScheduler::new(10);
        assert!(scheduler.poll(t0));
        assert!(!scheduler.poll(t0 + ms(50)));
        assert!(!scheduler.poll(t0 + ms(99)));
        assert!(scheduler.poll(t0 + ms(100)));
    }

    #[test]
    fn test_remainder_carried_over() {
        let t0 = Instant::now();
        let mut scheduler = TickScheduler::new(10);
        assert!(scheduler.poll(t0));
        // Late by 30ms: the next deadline stays on the 100ms grid.
        assert!(scheduler.poll(t0 + ms(130)));
        assert!(!scheduler.poll(t0 + ms(199)));
        assert!(scheduler.poll(t0 + ms(200)));
    }

    #[test]
    fn test_average_rate_matches_cap() {
        let t0 = Instant::now();
        let mut scheduler = TickScheduler::new(20);
        // Poll every 7ms for one simulated second.
        let ticks = (0..=142).filter(|i| scheduler.poll(t0 + ms(i * 7))).count();
        assert_eq!(ticks, 20);
    }

    #[test]
    fn test_stall_yields_single_tick() {
        let t0 = Instant::now();
        let mut scheduler = TickScheduler::new(10);
        assert!(scheduler.poll(t0));
        assert!(scheduler.poll(t0 + ms(1050)));
        assert!(!scheduler.poll(t0 + ms(1051)));
        assert!(scheduler.poll(t0 + ms(1100)));
    }

    #[test]
    fn test_uncapped_always_due() {
        let t0 = Instant::now();
        let mut scheduler = TickScheduler::uncapped();
        assert!(scheduler.poll(t0));
        assert!(scheduler.poll(t0));
        assert_eq!(scheduler.time_until_next(t0), Duration::ZERO);
    }

    #[test]
    fn test_time_until_next() {
        let t0 = Instant::now();
        let mut scheduler = TickScheduler::new(10);
        assert_eq!(scheduler.time_until_next(t0), Duration::ZERO);
        scheduler.poll(t0);
        assert_eq!(scheduler.time_until_next(t0 + ms(40)), ms(60));
        assert_eq!(scheduler.time_until_next(t0 + ms(150)), Duration::ZERO);
    }

    #[test]
    fn test_rate_clamped() {
        let mut scheduler = TickScheduler::new(10_000);
        assert_eq!(scheduler.max_ticks_per_second(), MAX_TICKS_PER_SECOND);
        scheduler.set_max_ticks_per_second(0);
        assert!(scheduler.poll(Instant::now()));
    }

    #[test]
    fn test_reset_makes_next_poll_due() {
        let t0 = Instant::now();
        let mut scheduler = TickScheduler::new(1);
        assert!(scheduler.poll(t0));
        assert!(!scheduler.poll(t0 + ms(10)));
        scheduler.reset();
        assert!(scheduler.poll(t0 + ms(20)));
    }
}
