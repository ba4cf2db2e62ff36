use crate::{BoxError, ViewKind};

/// A host view the engine can bind, refresh, and recycle.
///
/// The engine owns views while they are active or pooled; the host only sees them
/// through these callbacks and the accessors on [`crate::Scroller`].
pub trait ViewHandle {
    /// The template kind this view was built from. Must not change over the view's life.
    fn kind(&self) -> ViewKind;

    /// Binds the view to `data_index`. Called on every activation, fresh or reused.
    fn set_data(&mut self, data_index: usize);

    /// Re-renders the currently bound data without rebinding.
    fn refresh(&mut self) {}

    /// Called right before the view moves into the pool.
    fn will_recycle(&mut self) {}
}

/// Host-side data source and view factory.
pub trait ScrollDelegate {
    type View: ViewHandle;

    fn item_count(&self) -> usize;

    /// Extent of `data_index` along the scroll axis. Must be finite and non-negative.
    fn item_size(&self, data_index: usize) -> f32;

    fn view_kind(&self, _data_index: usize) -> ViewKind {
        ViewKind::DEFAULT
    }

    /// Builds a new view of `kind`. Only called when the pool has none to reuse.
    ///
    /// In loop mode `view_index` can exceed the item count; `data_index` is always
    /// `view_index % item_count`.
    fn create_view(
        &mut self,
        kind: ViewKind,
        data_index: usize,
        view_index: usize,
    ) -> Result<Self::View, BoxError>;
}
