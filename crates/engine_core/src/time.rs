//! Fixed-step clock and tick-driven timers.

use std::time::Duration;

/// Fixed simulation rate (60 Hz).
pub const FIXED_DT: f32 = 1.0 / 60.0;
/// Maximum catch-up steps per frame to prevent a spiral of death.
pub const MAX_SUBSTEPS: u32 = 8;

/// Slack used when comparing accumulated float time against a deadline,
/// so 180 steps of 1/60 s reach a 3 s deadline on the 180th step.
const TIMER_EPSILON: f32 = 1e-4;

/// Turns variable frame time into a whole number of fixed simulation ticks.
#[derive(Debug)]
pub struct FixedClock {
    /// Fixed timestep.
    fixed_timestep: Duration,
    /// Accumulated time not yet consumed by ticks.
    accumulator: Duration,
    /// Ticks run since start.
    tick_count: u64,
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FixedClock {
    /// Create a clock running at the default fixed rate.
    pub fn new() -> Self {
        Self {
            fixed_timestep: Duration::from_secs_f32(FIXED_DT),
            accumulator: Duration::ZERO,
            tick_count: 0,
        }
    }

    /// Set the fixed tick rate in Hz.
    pub fn set_fixed_rate(&mut self, hz: f64) {
        self.fixed_timestep = Duration::from_secs_f64(1.0 / hz);
    }

    /// Get the fixed timestep in seconds.
    pub fn fixed_timestep_seconds(&self) -> f32 {
        self.fixed_timestep.as_secs_f32()
    }

    /// Feed a frame delta and return how many ticks to run, at most [`MAX_SUBSTEPS`].
    /// Time beyond the cap is dropped.
    pub fn advance(&mut self, delta: Duration) -> u32 {
        self.accumulator += delta;
        let mut steps = 0;
        while self.accumulator >= self.fixed_timestep && steps < MAX_SUBSTEPS {
            self.accumulator -= self.fixed_timestep;
            steps += 1;
        }
        if steps == MAX_SUBSTEPS && self.accumulator >= self.fixed_timestep {
            log::debug!("Fixed clock fell behind by {:?}, dropping", self.accumulator);
            self.accumulator = Duration::ZERO;
        }
        self.tick_count += u64::from(steps);
        steps
    }

    /// Ticks run since start.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Simulated seconds since start.
    pub fn elapsed_seconds(&self) -> f64 {
        self.tick_count as f64 * self.fixed_timestep.as_secs_f64()
    }
}

/// Counts simulated time toward a fixed deadline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timer {
    elapsed: f32,
    duration: f32,
}

impl Timer {
    pub fn new(duration: f32) -> Self {
        Self {
            elapsed: 0.0,
            duration,
        }
    }

    /// Advance by `dt` and return true once the deadline is reached.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed + TIMER_EPSILON >= self.duration
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn remaining(&self) -> f32 {
        if self.is_finished() {
            0.0
        } else {
            self.duration - self.elapsed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_reaches_three_seconds_on_tick_180() {
        let mut timer = Timer::new(3.0);
        for _ in 0..179 {
            assert!(!timer.tick(FIXED_DT));
        }
        assert!(timer.tick(FIXED_DT));
        assert_eq!(timer.remaining(), 0.0);
    }

    #[test]
    fn remaining_counts_down_to_zero() {
        let mut timer = Timer::new(0.2);
        timer.tick(FIXED_DT);
        assert!((timer.remaining() - (0.2 - FIXED_DT)).abs() < 1e-6);
        for _ in 0..11 {
            timer.tick(FIXED_DT);
        }
        // Twelve float steps land within the slack of 0.2.
        assert!(timer.is_finished());
        assert_eq!(timer.remaining(), 0.0);
    }

    #[test]
    fn zero_duration_timer_is_already_finished() {
        assert!(Timer::new(0.0).is_finished());
    }

    #[test]
    fn clock_caps_substeps_and_drops_backlog() {
        let mut clock = FixedClock::new();
        assert_eq!(clock.advance(Duration::from_secs(1)), MAX_SUBSTEPS);
        // Backlog was dropped, so a tiny frame yields nothing.
        assert_eq!(clock.advance(Duration::from_millis(1)), 0);
        assert_eq!(clock.tick_count(), u64::from(MAX_SUBSTEPS));
    }

    #[test]
    fn clock_accumulates_partial_frames() {
        let mut clock = FixedClock::new();
        clock.set_fixed_rate(100.0);
        assert_eq!(clock.advance(Duration::from_millis(6)), 0);
        assert_eq!(clock.advance(Duration::from_millis(6)), 1);
        assert!((clock.elapsed_seconds() - 0.01).abs() < 1e-9);
    }
}
