use crate::animation::ValueAnimation;
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationPhase {
    Idle,
    Animating,
}

/// Values one indicator animates between.
///
/// `current_value` and `old_value` are sweep angles in degrees; `target_value`,
/// `min_value` and `max_value` live in the caller's value domain.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorState {
    current_value: f64,
    old_value: f64,
    target_value: f64,
    min_value: f64,
    max_value: f64,
    phase: AnimationPhase,
}

pub(crate) fn check_range(min_value: f64, max_value: f64) -> Result<(), ConfigError> {
    if !min_value.is_finite() {
        return Err(ConfigError::NonFinite { field: "min_value" });
    }
    if !max_value.is_finite() {
        return Err(ConfigError::NonFinite { field: "max_value" });
    }
    if max_value - min_value <= 0.0 {
        return Err(ConfigError::InvalidRange {
            min: min_value,
            max: max_value,
        });
    }
    Ok(())
}

impl IndicatorState {
    pub fn new(min_value: f64, max_value: f64) -> Result<Self, ConfigError> {
        check_range(min_value, max_value)?;

        Ok(Self {
            current_value: 0.0,
            old_value: 0.0,
            target_value: min_value,
            min_value,
            max_value,
            phase: AnimationPhase::Idle,
        })
    }

    pub fn current_value(&self) -> f64 {
        self.current_value
    }

    pub fn old_value(&self) -> f64 {
        self.old_value
    }

    pub fn target_value(&self) -> f64 {
        self.target_value
    }

    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    pub fn value_range(&self) -> f64 {
        self.max_value - self.min_value
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    pub fn is_animating(&self) -> bool {
        self.phase == AnimationPhase::Animating
    }

    /// Changes the value domain. The current sweep is kept; callers restart
    /// the animation to re-map it.
    pub fn set_range(&mut self, min_value: f64, max_value: f64) -> Result<(), ConfigError> {
        check_range(min_value, max_value)?;
        self.min_value = min_value;
        self.max_value = max_value;
        self.target_value = self.clamp_to_range(self.target_value);
        Ok(())
    }

    fn clamp_to_range(&self, value: f64) -> f64 {
        value.clamp(self.min_value, self.max_value)
    }

    /// Idle -> Animating. Also restarts an in-flight animation, capturing the
    /// current (possibly mid-flight) sweep as the new starting point.
    ///
    /// Non-finite targets are dropped and leave the state untouched.
    pub fn begin(&mut self, target_value: f64) {
        if !target_value.is_finite() {
            log::debug!("dropping non-finite target {}", target_value);
            return;
        }
        let clamped = self.clamp_to_range(target_value);
        if clamped != target_value {
            log::debug!(
                "value {} outside [{}, {}], clamped to {}",
                target_value,
                self.min_value,
                self.max_value,
                clamped
            );
        }

        self.old_value = self.current_value;
        self.target_value = clamped;
        self.phase = AnimationPhase::Animating;
    }

    pub fn animation(&self, max_sweep: f64) -> ValueAnimation {
        ValueAnimation::new(
            self.old_value,
            self.target_value,
            self.min_value,
            self.value_range(),
            max_sweep,
        )
    }

    /// Applies one clock tick. Animating -> Idle once `elapsed_fraction`
    /// reaches 1. Ticks while idle leave the state untouched.
    pub fn tick(&mut self, elapsed_fraction: f64, max_sweep: f64) -> f64 {
        if self.phase == AnimationPhase::Idle {
            return self.current_value;
        }

        self.current_value = self.animation(max_sweep).on_tick(elapsed_fraction);

        if elapsed_fraction >= 1.0 {
            self.phase = AnimationPhase::Idle;
        }
        self.current_value
    }

    /// Sets the value without animating.
    pub fn jump_to(&mut self, value: f64, max_sweep: f64) {
        self.begin(value);
        self.tick(1.0, max_sweep);
    }

    /// Maps the current sweep back into the value domain.
    pub fn display_value(&self, max_sweep: f64) -> f64 {
        self.current_value / max_sweep * self.value_range() - self.min_value.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUARTER: f64 = 90.0;

    #[test]
    fn test_rejects_empty_or_inverted_range() {
        assert_eq!(
            IndicatorState::new(10.0, 10.0),
            Err(ConfigError::InvalidRange { min: 10.0, max: 10.0 })
        );
        assert!(IndicatorState::new(10.0, 0.0).is_err());
        assert_eq!(
            IndicatorState::new(f64::NAN, 1.0),
            Err(ConfigError::NonFinite { field: "min_value" })
        );
    }

    #[test]
    fn test_idle_animating_idle() {
        let mut state = IndicatorState::new(0.0, 100.0).unwrap();
        assert_eq!(state.phase(), AnimationPhase::Idle);

        state.begin(50.0);
        assert!(state.is_animating());
        state.tick(0.5, QUARTER);
        assert!(state.is_animating());
        assert_eq!(state.tick(1.0, QUARTER), 45.0);
        assert_eq!(state.phase(), AnimationPhase::Idle);
    }

    #[test]
    fn test_tick_while_idle_is_noop() {
        let mut state = IndicatorState::new(0.0, 100.0).unwrap();
        state.jump_to(20.0, QUARTER);
        let before = state.clone();
        state.tick(0.3, QUARTER);
        assert_eq!(state, before);
    }

    #[test]
    fn test_restart_captures_current_value() {
        let mut state = IndicatorState::new(0.0, 100.0).unwrap();
        state.begin(100.0);
        let mid = state.tick(0.5, QUARTER);
        assert_eq!(mid, 45.0);

        state.begin(0.0);
        assert_eq!(state.old_value(), mid);
        assert_eq!(state.current_value(), mid);
        assert_eq!(state.tick(1.0, QUARTER), 0.0);
    }

    #[test]
    fn test_target_is_clamped_to_range() {
        let mut state = IndicatorState::new(0.0, 100.0).unwrap();
        state.begin(250.0);
        assert_eq!(state.target_value(), 100.0);
        assert_eq!(state.tick(1.0, QUARTER), 90.0);
    }

    #[test]
    fn test_non_finite_target_is_dropped() {
        let mut state = IndicatorState::new(0.0, 100.0).unwrap();
        state.jump_to(20.0, QUARTER);
        let before = state.clone();

        state.begin(f64::NAN);
        state.begin(f64::INFINITY);
        assert_eq!(state, before);

        state.begin(50.0);
        assert_eq!(state.tick(1.0, QUARTER), 45.0);
    }

    #[test]
    fn test_positive_min_overshoots_max_sweep() {
        // target + |min| is kept as is: with min > 0 the sweep passes 90.
        let mut state = IndicatorState::new(50.0, 150.0).unwrap();
        state.begin(150.0);
        assert_eq!(state.tick(1.0, QUARTER), 180.0);
    }

    #[test]
    fn test_display_value_round_trips_quarter_steps() {
        let mut state = IndicatorState::new(-20.0, 80.0).unwrap();
        state.jump_to(30.0, QUARTER);
        assert_eq!(state.current_value(), 45.0);
        assert_eq!(state.display_value(QUARTER), 30.0);
    }

    #[test]
    fn test_set_range_validates_and_clamps_target() {
        let mut state = IndicatorState::new(0.0, 100.0).unwrap();
        state.begin(90.0);
        assert!(state.set_range(5.0, 5.0).is_err());
        assert_eq!(state.max_value(), 100.0);

        state.set_range(0.0, 50.0).unwrap();
        assert_eq!(state.target_value(), 50.0);
    }
}
