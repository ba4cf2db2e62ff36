use core::time::Duration;

use scroll_recycler::{ItemEdge, ScrollDelegate, Scroller};

use crate::Easing;
use crate::math::abs;

/// Which copy of a looping list a jump lands in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoopJumpDirection {
    /// The copy nearest to the current position.
    #[default]
    Closest,
    /// The first copy.
    Up,
    /// The last copy.
    Down,
}

/// Per-call configuration for [`crate::Controller::jump_to_index`].
///
/// `viewport_offset` is the fraction of the viewport above the target item (`0` puts it
/// at the leading edge, `0.5` in the middle); `item_offset` shifts by a fraction of the
/// item's own size.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JumpRequest {
    pub viewport_offset: f32,
    pub item_offset: f32,
    /// Count spacing as part of the item, and stop one spacing short of it.
    pub use_spacing: bool,
    pub easing: Easing,
    pub duration: Duration,
    pub loop_direction: LoopJumpDirection,
}

impl Default for JumpRequest {
    fn default() -> Self {
        Self::new()
    }
}

impl JumpRequest {
    pub const fn new() -> Self {
        Self {
            viewport_offset: 0.0,
            item_offset: 0.0,
            use_spacing: true,
            easing: Easing::Immediate,
            duration: Duration::ZERO,
            loop_direction: LoopJumpDirection::Closest,
        }
    }

    pub fn with_viewport_offset(mut self, viewport_offset: f32) -> Self {
        self.viewport_offset = viewport_offset;
        self
    }

    pub fn with_item_offset(mut self, item_offset: f32) -> Self {
        self.item_offset = item_offset;
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

    pub fn with_loop_direction(mut self, loop_direction: LoopJumpDirection) -> Self {
        self.loop_direction = loop_direction;
        self
    }

    pub fn is_immediate(&self) -> bool {
        self.easing.is_immediate() || self.duration.is_zero()
    }
}

/// Computes the clamped scroll position that brings `data_index` to `request`'s anchor.
///
/// Out-of-range indexes clamp to the last item. Returns `None` for an empty list.
pub fn jump_target<D: ScrollDelegate>(
    scroller: &Scroller<D>,
    data_index: usize,
    request: &JumpRequest,
) -> Option<f32> {
    let count = scroller.item_count();
    let last = count.checked_sub(1)?;
    let data_index = data_index.min(last);
    let spacing = scroller.options().spacing;

    let mut item_shift = 0.0;
    if request.item_offset != 0.0 {
        let mut size = scroller.data_item_size(data_index);
        if request.use_spacing {
            size += spacing;
            if data_index > 0 && data_index < last {
                size += spacing;
            }
        }
        item_shift = size * request.item_offset;
    }
    if request.viewport_offset == 1.0 {
        item_shift += scroller.options().trailing_padding();
    }
    let offset = item_shift - request.viewport_offset * scroller.viewport_size();

    let target = match scroller.loop_layout() {
        Some(layout) => {
            let current = scroller.scroll_position();
            let copy_len = layout.copy_len();
            let candidate = |copy: usize| {
                scroller.position_before(data_index + copy * copy_len) + offset
            };
            match request.loop_direction {
                LoopJumpDirection::Up => candidate(0),
                LoopJumpDirection::Down => candidate(2),
                LoopJumpDirection::Closest => {
                    let (p1, p2, p3) = (candidate(0), candidate(1), candidate(2));
                    let (d1, d2, d3) = (
                        abs(current - p1),
                        abs(current - p2),
                        abs(current - p3),
                    );
                    if d1 < d2 {
                        if d1 < d3 { p1 } else { p3 }
                    } else if d2 < d3 {
                        p2
                    } else {
                        p3
                    }
                }
            }
        }
        None => scroller.position_for_data_index(data_index, ItemEdge::Before) + offset,
    };

    let max = scroller.max_scroll_position();
    let mut target = target.clamp(0.0, max);
    if request.use_spacing {
        target = (target - spacing).clamp(0.0, max);
    }
    Some(target)
}
