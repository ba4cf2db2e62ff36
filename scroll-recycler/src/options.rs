use alloc::sync::Arc;

use crate::{EdgePadding, ScrollAxis, ScrollbarVisibility, ScrollerEvent};

/// A callback receiving every [`ScrollerEvent`], in emission order.
pub type EventListener = Arc<dyn Fn(&ScrollerEvent) + Send + Sync>;

/// Configuration for [`crate::Scroller`].
///
/// Cheap to clone; the listener is shared through an `Arc`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollerOptions {
    pub axis: ScrollAxis,

    /// Gap between consecutive items. Must be finite and non-negative.
    pub spacing: f32,

    /// Padding around the content. Only the edges on `axis` shift geometry.
    pub padding: EdgePadding,

    /// Wraps the list around so scrolling never reaches an end.
    pub looping: bool,

    pub scrollbar_visibility: ScrollbarVisibility,

    #[cfg_attr(feature = "serde", serde(skip))]
    pub on_event: Option<EventListener>,
}

impl Clone for ScrollerOptions {
    fn clone(&self) -> Self {
        Self {
            axis: self.axis,
            spacing: self.spacing,
            padding: self.padding,
            looping: self.looping,
            scrollbar_visibility: self.scrollbar_visibility,
            on_event: self.on_event.clone(),
        }
    }
}

impl Default for ScrollerOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollerOptions {
    pub fn new() -> Self {
        Self {
            axis: ScrollAxis::Vertical,
            spacing: 0.0,
            padding: EdgePadding::ZERO,
            looping: false,
            scrollbar_visibility: ScrollbarVisibility::OnlyIfNeeded,
            on_event: None,
        }
    }

    pub fn with_axis(mut self, axis: ScrollAxis) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_padding(mut self, padding: EdgePadding) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn with_scrollbar_visibility(mut self, visibility: ScrollbarVisibility) -> Self {
        self.scrollbar_visibility = visibility;
        self
    }

    pub fn with_on_event(
        mut self,
        on_event: Option<impl Fn(&ScrollerEvent) + Send + Sync + 'static>,
    ) -> Self {
        self.on_event = on_event.map(|f| Arc::new(f) as _);
        self
    }

    /// Leading edge padding on the scroll axis.
    pub fn leading_padding(&self) -> f32 {
        self.padding.leading(self.axis)
    }

    pub fn trailing_padding(&self) -> f32 {
        self.padding.trailing(self.axis)
    }

    pub(crate) fn same_geometry(&self, other: &Self) -> bool {
        self.axis == other.axis
            && self.spacing == other.spacing
            && self.padding == other.padding
            && self.looping == other.looping
    }
}

impl core::fmt::Debug for ScrollerOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollerOptions")
            .field("axis", &self.axis)
            .field("spacing", &self.spacing)
            .field("padding", &self.padding)
            .field("looping", &self.looping)
            .field("scrollbar_visibility", &self.scrollbar_visibility)
            .field("on_event", &self.on_event.is_some())
            .finish_non_exhaustive()
    }
}
