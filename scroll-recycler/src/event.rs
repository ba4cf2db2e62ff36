use crate::ViewTransition;

/// Notifications emitted by [`crate::Scroller`] to its listener.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollerEvent {
    /// A view is about to move into the pool. Always followed by a
    /// `ViewVisibilityChanged` with `active == false` for the same view.
    ViewWillRecycle(ViewTransition),
    ViewVisibilityChanged(ViewTransition),
    /// The scroll position changed. `normalized` uses the axis-aware mapping of
    /// [`crate::ScrollAxis::normalized_from_position`].
    Scrolled { position: f32, normalized: f32 },
    /// A snap finished on `view_index` / `data_index`.
    Snapped { view_index: usize, data_index: usize },
    /// Velocity became non-zero (`true`) or returned to zero (`false`).
    ScrollingChanged(bool),
    TweeningChanged(bool),
}
