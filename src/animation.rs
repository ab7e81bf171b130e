//! Value-change animation.
//!
//! [`ValueAnimation`] is the per-tick update: a pure function of the old
//! sweep, the requested value and the elapsed fraction reported by a clock.
//! [`AnimationClock`] is the host-side clock the window loop uses to produce
//! that fraction from wall time.

use std::f64::consts::PI;
use std::time::{Duration, Instant};

/// Smallest fraction a tick is evaluated at. Keeps a zero first tick from
/// producing a frame identical to the previous one.
pub const MIN_ANIMATED_FRACTION: f64 = 0.01;

/// One in-flight value transition, expressed in sweep degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueAnimation {
    old_value: f64,
    shift: f64,
}

impl ValueAnimation {
    /// `value_range` must be positive; [`crate::IndicatorState`] guarantees it.
    pub fn new(
        old_value: f64,
        target_value: f64,
        min_value: f64,
        value_range: f64,
        max_sweep: f64,
    ) -> Self {
        let absolute_target = target_value + min_value.abs();
        let shift = ((absolute_target / value_range) * max_sweep - old_value).round();

        Self { old_value, shift }
    }

    pub fn shift(&self) -> f64 {
        self.shift
    }

    /// Sweep reached once the clock reports completion.
    pub fn final_value(&self) -> f64 {
        self.old_value + self.shift
    }

    pub fn on_tick(&self, elapsed_fraction: f64) -> f64 {
        let fraction = elapsed_fraction.max(MIN_ANIMATED_FRACTION);
        self.old_value + self.shift * fraction
    }
}

/// Interpolator applied to the clock's linear progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// Cosine ease: slow start, fast middle, slow end.
    #[default]
    AccelerateDecelerate,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
        }
    }
}

/// Wall-clock timer reporting an eased elapsed fraction in `[0, 1]`.
#[derive(Debug, Clone, Copy)]
pub struct AnimationClock {
    started: Instant,
    duration: Duration,
    easing: Easing,
}

impl AnimationClock {
    pub fn start(duration: Duration, easing: Easing) -> Self {
        Self::start_at(Instant::now(), duration, easing)
    }

    pub fn start_at(started: Instant, duration: Duration, easing: Easing) -> Self {
        Self {
            started,
            duration,
            easing,
        }
    }

    fn linear_fraction(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Eased fraction at `now`. Returns exactly `1.0` once the duration has
    /// elapsed so the final frame lands on the target.
    pub fn fraction_at(&self, now: Instant) -> f64 {
        let linear = self.linear_fraction(now);
        if linear >= 1.0 {
            1.0
        } else {
            self.easing.apply(linear)
        }
    }

    pub fn is_finished_at(&self, now: Instant) -> bool {
        self.linear_fraction(now) >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_quarter_half_range_lands_on_45() {
        let animation = ValueAnimation::new(0.0, 50.0, 0.0, 100.0, 90.0);
        assert_eq!(animation.shift(), 45.0);
        assert_eq!(animation.on_tick(1.0), 45.0);
    }

    #[test]
    fn test_negative_min_offsets_target() {
        let animation = ValueAnimation::new(0.0, 30.0, -20.0, 100.0, 90.0);
        assert_eq!(animation.shift(), 45.0);
        assert_eq!(animation.on_tick(1.0), 45.0);
    }

    #[test]
    fn test_zero_fraction_uses_floor() {
        let animation = ValueAnimation::new(10.0, 80.0, 0.0, 100.0, 90.0);
        assert_eq!(animation.on_tick(0.0), animation.on_tick(MIN_ANIMATED_FRACTION));
        assert!(animation.on_tick(0.0) > 10.0);
    }

    #[test]
    fn test_final_value_independent_of_intermediate_ticks() {
        let animation = ValueAnimation::new(12.0, 73.0, 0.0, 100.0, 360.0);
        let direct = animation.on_tick(1.0);

        let mut last = 0.0;
        for fraction in [0.1, 0.35, 0.36, 0.9, 1.0] {
            last = animation.on_tick(fraction);
        }
        assert_eq!(last, direct);
        assert_eq!(direct, animation.final_value());
    }

    #[test]
    fn test_shift_is_rounded() {
        // 33/100 * 90 = 29.7
        let animation = ValueAnimation::new(0.0, 33.0, 0.0, 100.0, 90.0);
        assert_eq!(animation.shift(), 30.0);

        // Moving back down produces a negative shift.
        let animation = ValueAnimation::new(60.0, 10.0, 0.0, 100.0, 90.0);
        assert_eq!(animation.shift(), -51.0);
        assert_eq!(animation.final_value(), 9.0);
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::AccelerateDecelerate] {
            assert!(easing.apply(0.0).abs() < EPS);
            assert!((easing.apply(1.0) - 1.0).abs() < EPS);
        }
        assert!((Easing::AccelerateDecelerate.apply(0.5) - 0.5).abs() < EPS);
        assert!(Easing::AccelerateDecelerate.apply(0.1) < 0.1);
    }

    #[test]
    fn test_clock_reports_progress() {
        let start = Instant::now();
        let clock = AnimationClock::start_at(start, Duration::from_millis(400), Easing::Linear);

        assert!(clock.fraction_at(start).abs() < EPS);
        let halfway = clock.fraction_at(start + Duration::from_millis(200));
        assert!((halfway - 0.5).abs() < 1e-6);
        assert!(!clock.is_finished_at(start + Duration::from_millis(200)));

        assert_eq!(clock.fraction_at(start + Duration::from_millis(900)), 1.0);
        assert!(clock.is_finished_at(start + Duration::from_millis(400)));
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let start = Instant::now();
        let clock = AnimationClock::start_at(start, Duration::ZERO, Easing::AccelerateDecelerate);
        assert_eq!(clock.fraction_at(start), 1.0);
        assert!(clock.is_finished_at(start));
    }
}
