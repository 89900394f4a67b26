//! Fixed-step count animations for the metric displays.
//!
//! A [`CountAnimation`] walks an integer display from one value to another
//! in a fixed number of discrete steps. The last step always lands on the
//! target exactly, whatever rounding happened along the way.

use std::time::Duration;

/// Default number of steps per transition.
pub const DEFAULT_STEPS: u32 = 20;

/// Default wall-clock length of a transition.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(300);

// =============================================================================
// AnimationConfig
// =============================================================================

/// Timing of a count transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationConfig {
    /// Number of discrete steps
    pub steps: u32,
    /// Total duration of the transition
    pub duration: Duration,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            steps: DEFAULT_STEPS,
            duration: DEFAULT_DURATION,
        }
    }
}

impl AnimationConfig {
    /// Transitions that jump straight to the target.
    pub const INSTANT: Self = Self {
        steps: 0,
        duration: Duration::ZERO,
    };

    /// Create a config with the given step count and duration.
    #[must_use]
    pub const fn new(steps: u32, duration: Duration) -> Self {
        Self { steps, duration }
    }

    /// Time between two steps (15 ms for the defaults).
    #[must_use]
    pub fn step_interval(&self) -> Duration {
        if self.steps == 0 {
            Duration::ZERO
        } else {
            self.duration / self.steps
        }
    }
}

// =============================================================================
// CountAnimation
// =============================================================================

/// Stepwise transition of an integer display value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountAnimation {
    from: usize,
    to: usize,
    steps: u32,
    step: u32,
}

impl CountAnimation {
    /// Create a linear animation from `from` to `to` over `steps` steps.
    ///
    /// Zero steps completes immediately at `to`.
    #[must_use]
    pub const fn new(from: usize, to: usize, steps: u32) -> Self {
        Self {
            from,
            to,
            steps,
            step: 0,
        }
    }

    /// Create an animation using the step count of `config`.
    #[must_use]
    pub const fn with_config(from: usize, to: usize, config: &AnimationConfig) -> Self {
        Self::new(from, to, config.steps)
    }

    /// Start value.
    #[must_use]
    pub const fn from(&self) -> usize {
        self.from
    }

    /// Target value.
    #[must_use]
    pub const fn to(&self) -> usize {
        self.to
    }

    /// Number of steps taken so far.
    #[must_use]
    pub const fn step(&self) -> u32 {
        self.step
    }

    /// Steps left before the target is reached.
    #[must_use]
    pub const fn remaining_steps(&self) -> u32 {
        self.steps.saturating_sub(self.step)
    }

    /// Whether the target has been reached.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.step >= self.steps
    }

    /// Value shown after the current step.
    #[must_use]
    pub fn value(&self) -> usize {
        self.value_at(self.step)
    }

    /// Value shown after `step` steps: `from + (to - from) * step / steps`,
    /// rounded half up.
    #[must_use]
    pub fn value_at(&self, step: u32) -> usize {
        if step >= self.steps {
            return self.to;
        }
        let from = self.from as f64;
        let delta = self.to as f64 - from;
        round_half_up(from + delta * f64::from(step) / f64::from(self.steps))
    }

    /// Take one step and return the new display value.
    pub fn advance(&mut self) -> usize {
        if self.step < self.steps {
            self.step += 1;
        }
        self.value()
    }
}

fn round_half_up(x: f64) -> usize {
    (x + 0.5).floor().max(0.0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_step_interval_is_15ms() {
        let config = AnimationConfig::default();
        assert_eq!(config.steps, 20);
        assert_eq!(config.duration, Duration::from_millis(300));
        assert_eq!(config.step_interval(), Duration::from_millis(15));
    }

    #[test]
    fn test_instant_config_has_zero_interval() {
        assert_eq!(AnimationConfig::INSTANT.step_interval(), Duration::ZERO);
    }

    #[test]
    fn test_count_up_linear_steps() {
        let mut anim = CountAnimation::new(0, 20, 20);
        assert_eq!(anim.value(), 0);
        assert_eq!(anim.advance(), 1);
        assert_eq!(anim.advance(), 2);
        assert_eq!(anim.remaining_steps(), 18);
    }

    #[test]
    fn test_count_down() {
        let mut anim = CountAnimation::new(100, 0, 4);
        assert_eq!(anim.advance(), 75);
        assert_eq!(anim.advance(), 50);
        assert_eq!(anim.advance(), 25);
        assert_eq!(anim.advance(), 0);
        assert!(anim.is_complete());
    }

    #[test]
    fn test_rounds_half_up() {
        // 0 -> 3 over 2 steps: midpoint 1.5 shows as 2
        let anim = CountAnimation::new(0, 3, 2);
        assert_eq!(anim.value_at(1), 2);
    }

    #[test]
    fn test_final_step_is_exact() {
        let mut anim = CountAnimation::new(7, 1234, 20);
        let mut last = 0;
        while !anim.is_complete() {
            last = anim.advance();
        }
        assert_eq!(last, 1234);
        assert_eq!(anim.advance(), 1234);
    }

    #[test]
    fn test_zero_steps_jumps() {
        let anim = CountAnimation::new(5, 9, 0);
        assert!(anim.is_complete());
        assert_eq!(anim.value(), 9);
    }

    #[test]
    fn test_with_config_steps_are_evenly_spaced() {
        let config = AnimationConfig::new(4, Duration::from_millis(40));
        let anim = CountAnimation::with_config(0, 100, &config);
        let values: Vec<_> = (0..=4).map(|k| anim.value_at(k)).collect();
        assert_eq!(values, vec![0, 25, 50, 75, 100]);
    }

    #[test]
    fn test_first_step_toward_200_moves_a_twentieth() {
        let mut anim = CountAnimation::with_config(0, 200, &AnimationConfig::default());
        assert_eq!(anim.advance(), 10);
        assert_eq!(anim.advance(), 20);
    }

    proptest! {
        #[test]
        fn prop_always_ends_at_target(from in 0usize..100_000, to in 0usize..100_000, steps in 0u32..50) {
            let mut anim = CountAnimation::new(from, to, steps);
            for _ in 0..steps {
                anim.advance();
            }
            prop_assert!(anim.is_complete());
            prop_assert_eq!(anim.value(), to);
        }

        #[test]
        fn prop_linear_values_stay_between_endpoints(from in 0usize..10_000, to in 0usize..10_000, steps in 1u32..50) {
            let anim = CountAnimation::new(from, to, steps);
            let (lo, hi) = (from.min(to), from.max(to));
            for k in 0..=steps {
                let v = anim.value_at(k);
                prop_assert!(v >= lo && v <= hi);
            }
        }
    }
}
