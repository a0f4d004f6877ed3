// Headline count-up state machine
use std::time::Duration;

use crate::domain::train::TrainSnapshot;

/// Length of the one-shot count-up on first data arrival.
pub const COUNT_UP_DURATION: Duration = Duration::from_millis(900);

/// The three headline numbers shown at the top of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HeadlineValues {
    pub velocita: f64,
    pub potenza_kw: f64,
    pub energia_kwh: f64,
}

impl HeadlineValues {
    pub fn from_snapshot(train: &TrainSnapshot) -> Self {
        Self {
            velocita: train.velocita,
            potenza_kw: train.potenza_kw,
            energia_kwh: train.energia_kwh,
        }
    }
}

pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Animating,
    Settled,
}

/// Two-state machine for the headline values: a single eased count-up
/// toward the first snapshot, then verbatim passthrough for the rest of
/// the session. Settled is terminal.
#[derive(Debug)]
pub struct ValueAnimator {
    target: HeadlineValues,
    phase: Phase,
}

impl ValueAnimator {
    pub fn new(target: HeadlineValues) -> Self {
        Self {
            target,
            phase: Phase::Animating,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.phase == Phase::Settled
    }

    /// Replace the target mid-flight. The caller restarts its clock when
    /// this happens during the count-up.
    pub fn retarget(&mut self, target: HeadlineValues) {
        self.target = target;
    }

    /// Current display values for the given elapsed time. While animating
    /// the values count up along an ease-out cubic, rounded to whole
    /// numbers; once the duration has fully elapsed the machine settles
    /// and every later sample returns the target verbatim.
    pub fn sample(&mut self, elapsed: Duration) -> HeadlineValues {
        match self.phase {
            Phase::Settled => self.target,
            Phase::Animating => {
                let t = (elapsed.as_secs_f64() / COUNT_UP_DURATION.as_secs_f64()).min(1.0);
                let eased = ease_out_cubic(t);
                if t >= 1.0 {
                    self.phase = Phase::Settled;
                }
                HeadlineValues {
                    velocita: (self.target.velocita * eased).round(),
                    potenza_kw: (self.target.potenza_kw * eased).round(),
                    energia_kwh: (self.target.energia_kwh * eased).round(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(velocita: f64) -> HeadlineValues {
        HeadlineValues {
            velocita,
            potenza_kw: 0.0,
            energia_kwh: 0.0,
        }
    }

    #[test]
    fn test_starts_at_zero() {
        let mut animator = ValueAnimator::new(target(200.0));
        let values = animator.sample(Duration::ZERO);
        assert_eq!(values.velocita, 0.0);
        assert!(!animator.is_settled());
    }

    #[test]
    fn test_reaches_target_exactly_at_full_duration() {
        let mut animator = ValueAnimator::new(target(200.0));
        let values = animator.sample(COUNT_UP_DURATION);
        assert_eq!(values.velocita, 200.0);
        assert!(animator.is_settled());
    }

    #[test]
    fn test_monotonic_for_non_negative_target() {
        let mut animator = ValueAnimator::new(target(245.0));
        let mut previous = f64::MIN;
        for millis in (0..=900).step_by(16) {
            let values = animator.sample(Duration::from_millis(millis));
            assert!(values.velocita >= previous);
            previous = values.velocita;
        }
    }

    #[test]
    fn test_settled_passes_values_through_verbatim() {
        let mut animator = ValueAnimator::new(target(200.0));
        animator.sample(COUNT_UP_DURATION);
        assert!(animator.is_settled());

        animator.retarget(target(180.5));
        let values = animator.sample(Duration::ZERO);
        assert_eq!(values.velocita, 180.5);
    }

    #[test]
    fn test_ease_out_cubic_bounds() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        let mid = ease_out_cubic(0.5);
        assert!(mid > 0.5 && mid < 1.0);
    }
}
