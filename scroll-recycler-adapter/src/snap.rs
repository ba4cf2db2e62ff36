use core::time::Duration;

use crate::math::abs;
use crate::{Easing, JumpRequest, LoopJumpDirection};

/// Snapping configuration for [`crate::Controller`].
///
/// When enabled, a host scroll update whose velocity drops to within
/// `velocity_threshold` (but is not zero) triggers a snap: the item under
/// `watch_offset` of the viewport is jumped to `jump_to_offset`, centered on
/// `item_center_offset` of its own size.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnapOptions {
    pub enabled: bool,
    pub velocity_threshold: f32,
    pub watch_offset: f32,
    pub jump_to_offset: f32,
    pub item_center_offset: f32,
    pub use_spacing: bool,
    pub easing: Easing,
    pub duration: Duration,
}

impl Default for SnapOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapOptions {
    pub const fn new() -> Self {
        Self {
            enabled: false,
            velocity_threshold: 100.0,
            watch_offset: 0.5,
            jump_to_offset: 0.5,
            item_center_offset: 0.5,
            use_spacing: true,
            easing: Easing::EaseOutQuad,
            duration: Duration::from_millis(250),
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_velocity_threshold(mut self, velocity_threshold: f32) -> Self {
        self.velocity_threshold = velocity_threshold;
        self
    }

    pub fn with_watch_offset(mut self, watch_offset: f32) -> Self {
        self.watch_offset = watch_offset;
        self
    }

    pub fn with_jump_to_offset(mut self, jump_to_offset: f32) -> Self {
        self.jump_to_offset = jump_to_offset;
        self
    }

    pub fn with_item_center_offset(mut self, item_center_offset: f32) -> Self {
        self.item_center_offset = item_center_offset;
        self
    }

    pub fn with_use_spacing(mut self, use_spacing: bool) -> Self {
        self.use_spacing = use_spacing;
        self
    }

    pub fn with_tween(mut self, easing: Easing, duration: Duration) -> Self {
        self.easing = easing;
        self.duration = duration;
        self
    }

    /// Whether a host update with `velocity` should start a snap.
    pub fn should_snap(&self, velocity: f32) -> bool {
        self.enabled && velocity != 0.0 && abs(velocity) <= self.velocity_threshold
    }

    pub(crate) fn jump_request(&self) -> JumpRequest {
        JumpRequest {
            viewport_offset: self.jump_to_offset,
            item_offset: self.item_center_offset,
            use_spacing: self.use_spacing,
            easing: self.easing,
            duration: self.duration,
            loop_direction: LoopJumpDirection::Closest,
        }
    }
}
