//! Fixed-step tick clock.
//!
//! Display frames arrive with arbitrary durations; the fight only ever sees
//! whole fixed steps. Frame time is accumulated and converted into a bounded
//! number of ticks, each described by a [`TickTime`].

use brawl_gameplay::TickTime;

/// Longest frame fed into the accumulator, in seconds.
const MAX_FRAME_DT: f32 = 0.25;

/// Most ticks produced for a single frame.
const MAX_TICKS_PER_FRAME: u32 = 10;

/// Fixed timestep clock.
#[derive(Debug, Clone)]
pub struct TickClock {
    /// Fixed timestep delta
    fixed_dt: f32,
    /// Unconsumed frame time
    accumulator: f32,
    /// Timestamp of the last tick
    time: TickTime,
    /// Ticks produced so far
    ticks: u64,
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(60)
    }
}

impl TickClock {
    /// Create a clock ticking `tick_rate` times per second.
    #[must_use]
    pub fn new(tick_rate: u32) -> Self {
        let tick_rate = tick_rate.max(1);
        Self {
            fixed_dt: 1.0 / tick_rate as f32,
            accumulator: 0.0,
            time: TickTime::default(),
            ticks: 0,
        }
    }

    /// Get the fixed timestep value.
    #[must_use]
    pub fn fixed_dt(&self) -> f32 {
        self.fixed_dt
    }

    /// Ticks produced so far.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Simulated seconds elapsed.
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.time.previous + f64::from(self.time.seconds_passed)
    }

    /// Accumulate frame time.
    /// Returns the number of fixed ticks that should be run.
    pub fn accumulate(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);
        let mut count = 0;

        while self.accumulator >= self.fixed_dt && count < MAX_TICKS_PER_FRAME {
            self.accumulator -= self.fixed_dt;
            count += 1;
        }

        // Still behind: drop the backlog rather than spiral
        if self.accumulator > self.fixed_dt * 2.0 {
            self.accumulator = 0.0;
        }

        count
    }

    /// Produces the next tick's timestamp.
    pub fn next_tick(&mut self) -> TickTime {
        self.time = self.time.next(self.fixed_dt);
        self.ticks += 1;
        self.time
    }

    /// Interpolation factor between the last tick and the next.
    #[must_use]
    pub fn alpha(&self) -> f32 {
        (self.accumulator / self.fixed_dt).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_clock_creation() {
        let clock = TickClock::default();
        assert!((clock.fixed_dt() - 1.0 / 60.0).abs() < 0.001);
        assert_eq!(clock.ticks(), 0);
    }

    #[test]
    fn test_zero_rate_is_clamped() {
        let clock = TickClock::new(0);
        assert_eq!(clock.fixed_dt(), 1.0);
    }

    #[test]
    fn test_fixed_timestep() {
        let mut clock = TickClock::new(60);

        assert_eq!(clock.accumulate(0.01), 0);
        assert_eq!(clock.accumulate(0.01), 1);
        assert_eq!(clock.accumulate(0.05), 3);
    }

    #[test]
    fn test_long_frame_is_bounded() {
        let mut clock = TickClock::new(60);

        let count = clock.accumulate(10.0);
        assert!(count <= MAX_TICKS_PER_FRAME);
        assert!(clock.alpha() <= 1.0);
    }

    #[test]
    fn test_backlog_is_dropped() {
        let mut clock = TickClock::new(1000);

        assert_eq!(clock.accumulate(0.25), MAX_TICKS_PER_FRAME);
        assert_eq!(clock.alpha(), 0.0);
    }

    #[test]
    fn test_next_tick_advances_time() {
        let mut clock = TickClock::new(50);

        let first = clock.next_tick();
        assert_eq!(first.seconds_passed, 0.02);
        let second = clock.next_tick();
        assert!(second.previous > first.previous);
        assert_eq!(clock.ticks(), 2);
        assert!((clock.elapsed() - 0.04).abs() < 1e-6);
    }
}
