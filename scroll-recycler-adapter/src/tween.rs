use core::time::Duration;

use crate::Easing;

/// A position tween advanced by explicit time deltas.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub elapsed: Duration,
    pub duration: Duration,
    pub easing: Easing,
}

/// One step of a [`Tween`]. When `done` is set, `position` is exactly the target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenStep {
    pub position: f32,
    pub done: bool,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration,
            easing,
        }
    }

    /// `true` when the tween finishes without any intermediate step.
    pub fn is_immediate(&self) -> bool {
        self.easing.is_immediate() || self.duration.is_zero()
    }

    pub fn is_done(&self) -> bool {
        self.is_immediate() || self.elapsed >= self.duration
    }

    /// Moves in the direction of increasing positions.
    pub fn is_forward(&self) -> bool {
        self.to > self.from
    }

    pub fn progress(&self) -> f32 {
        if self.is_immediate() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Position at the current elapsed time.
    pub fn sample(&self) -> f32 {
        let eased = self.easing.sample(self.progress());
        self.from + (self.to - self.from) * eased
    }

    pub fn advance(&mut self, dt: Duration) -> TweenStep {
        self.elapsed = self.elapsed.saturating_add(dt);
        if self.is_done() {
            TweenStep {
                position: self.to,
                done: true,
            }
        } else {
            TweenStep {
                position: self.sample(),
                done: false,
            }
        }
    }
}
