/// The axis the list scrolls along.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollAxis {
    #[default]
    Vertical,
    Horizontal,
}

impl ScrollAxis {
    /// Converts an engine scroll position into the host container's normalized position.
    ///
    /// Vertical containers usually report `1.0` at the top, so the vertical mapping is
    /// inverted. `scroll_size` is the scrollable distance (content minus viewport).
    pub fn normalized_from_position(self, position: f32, scroll_size: f32) -> f32 {
        let n = if scroll_size > 0.0 {
            position / scroll_size
        } else {
            0.0
        };
        match self {
            Self::Vertical => 1.0 - n,
            Self::Horizontal => n,
        }
    }

    /// Inverse of [`Self::normalized_from_position`].
    pub fn position_from_normalized(self, normalized: f32, scroll_size: f32) -> f32 {
        let n = match self {
            Self::Vertical => 1.0 - normalized,
            Self::Horizontal => normalized,
        };
        n * scroll_size.max(0.0)
    }
}

/// Padding around the list content, in the host's units.
///
/// Only the two edges on the scroll axis affect geometry; see [`EdgePadding::leading`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgePadding {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl EdgePadding {
    pub const ZERO: Self = Self {
        top: 0.0,
        bottom: 0.0,
        left: 0.0,
        right: 0.0,
    };

    pub fn uniform(v: f32) -> Self {
        Self {
            top: v,
            bottom: v,
            left: v,
            right: v,
        }
    }

    /// Padding before the first item on `axis` (top or left).
    pub fn leading(&self, axis: ScrollAxis) -> f32 {
        match axis {
            ScrollAxis::Vertical => self.top,
            ScrollAxis::Horizontal => self.left,
        }
    }

    /// Padding after the last item on `axis` (bottom or right).
    pub fn trailing(&self, axis: ScrollAxis) -> f32 {
        match axis {
            ScrollAxis::Vertical => self.bottom,
            ScrollAxis::Horizontal => self.right,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollbarVisibility {
    #[default]
    OnlyIfNeeded,
    Always,
    Never,
}

/// Which edge of an item a position query refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemEdge {
    Before,
    After,
}

/// Tag distinguishing view templates that can share one list.
///
/// Views are only ever recycled into a slot of the same kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewKind(pub u32);

impl ViewKind {
    pub const DEFAULT: Self = Self(0);
}

/// An inclusive range of view indexes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemRange {
    pub start: usize,
    pub end: usize, // inclusive
}

impl ItemRange {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "ItemRange: start ({start}) > end ({end})");
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index <= self.end
    }
}

/// Placement of one item on the scroll axis (padding included).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemSpan {
    pub view_index: usize,
    pub start: f32,
    pub size: f32,
}

impl ItemSpan {
    pub fn end(&self) -> f32 {
        self.start + self.size
    }
}

/// Spacer sizes a host places around the realized views.
///
/// `leading` covers padding plus every item before the first active view; `trailing`
/// covers every item after the last active view plus padding.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpacerLayout {
    pub leading: f32,
    pub trailing: f32,
    pub content_extent: f32,
}

/// Result of feeding a host scroll update into the engine.
///
/// When `wrapped` is set the host must move its container to `position` and keep
/// `velocity` as-is so the loop reset stays invisible.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollUpdate {
    pub position: f32,
    pub velocity: f32,
    pub wrapped: bool,
}
