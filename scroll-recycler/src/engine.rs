use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::range;
use crate::recycler::{ActiveView, ReconcileMode, Recycler, ViewTransition};
use crate::{
    GeometryTable, ItemEdge, ItemRange, ItemSpan, LoopLayout, RecyclePool, ScrollDelegate,
    ScrollUpdate, ScrollbarVisibility, ScrollerError, ScrollerEvent, ScrollerOptions,
    SpacerLayout,
};

/// A recycling list engine.
///
/// The engine owns the geometry of every item, the realized ("active") views for the
/// items intersecting the viewport, and a pool of inactive views. The host feeds it the
/// viewport size and scroll updates; the engine binds, recycles, and reports views.
///
/// Positions are measured on the scroll axis from the start of the content, leading edge
/// padding included. View indexes address the (possibly loop-expanded) item sequence;
/// data indexes address the delegate's items, with `data = view % item_count`.
///
/// Every fallible operation is atomic: on error the geometry, the scroll position, and
/// the active views are the same as before the call.
pub struct Scroller<D: ScrollDelegate> {
    options: ScrollerOptions,
    delegate: Option<D>,

    viewport_size: f32,
    scroll_position: f32,
    velocity: f32,
    inertia: bool,
    is_scrolling: bool,

    geometry: GeometryTable,
    looping: Option<LoopLayout>,
    data_count: usize,
    recycler: Recycler<D::View>,
    visible: Option<ItemRange>,
    reload_pending: bool,

    transitions: Vec<ViewTransition>,
}

#[derive(Clone, Copy, Debug)]
struct Plan {
    position: f32,
    range: Option<ItemRange>,
    wrapped: bool,
}

impl<D: ScrollDelegate> Scroller<D> {
    /// Creates an engine with no delegate. It renders nothing until one is set.
    pub fn new(options: ScrollerOptions) -> Self {
        rdebug!(
            looping = options.looping,
            spacing = options.spacing,
            "Scroller::new"
        );
        Self {
            options,
            delegate: None,
            viewport_size: 0.0,
            scroll_position: 0.0,
            velocity: 0.0,
            inertia: true,
            is_scrolling: false,
            geometry: GeometryTable::new(),
            looping: None,
            data_count: 0,
            recycler: Recycler::new(),
            visible: None,
            reload_pending: false,
            transitions: Vec::new(),
        }
    }

    /// Creates an engine bound to `delegate`. The first reload happens on the next
    /// [`Self::tick`], or on an explicit [`Self::reload_data`].
    pub fn with_delegate(options: ScrollerOptions, delegate: D) -> Self {
        let mut s = Self::new(options);
        s.set_delegate(delegate);
        s
    }

    pub fn options(&self) -> &ScrollerOptions {
        &self.options
    }

    /// Applies new options, rebuilding geometry only when a layout field changed.
    pub fn set_options(&mut self, options: ScrollerOptions) -> Result<(), ScrollerError> {
        if self.options.same_geometry(&options) {
            self.options = options;
            return Ok(());
        }

        let target_looping = options.looping;
        let prev = core::mem::replace(&mut self.options, options);
        rtrace!(
            looping = self.options.looping,
            spacing = self.options.spacing,
            "Scroller::set_options"
        );

        let result = if prev.looping != target_looping {
            // `set_loop` maps the position between loop and non-loop space.
            self.options.looping = prev.looping;
            self.set_loop(target_looping)
        } else {
            self.relayout(self.scroll_position)
        };
        if result.is_err() {
            self.options = prev;
        }
        result
    }

    /// Clones the current options, applies `f`, then delegates to [`Self::set_options`].
    pub fn update_options(
        &mut self,
        f: impl FnOnce(&mut ScrollerOptions),
    ) -> Result<(), ScrollerError> {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next)
    }

    pub fn set_on_event(
        &mut self,
        on_event: Option<impl Fn(&ScrollerEvent) + Send + Sync + 'static>,
    ) {
        self.options.on_event = on_event.map(|f| Arc::new(f) as _);
    }

    /// Sends `event` to the listener. Adapters use this for the events they own
    /// (tweening, snapping).
    pub fn emit(&self, event: ScrollerEvent) {
        if let Some(cb) = &self.options.on_event {
            cb(&event);
        }
    }

    fn flush_transitions(&mut self) {
        if let Some(cb) = &self.options.on_event {
            for t in &self.transitions {
                if !t.active {
                    cb(&ScrollerEvent::ViewWillRecycle(*t));
                }
                cb(&ScrollerEvent::ViewVisibilityChanged(*t));
            }
        }
        self.transitions.clear();
    }

    // --- delegate ---------------------------------------------------------------------

    /// Installs `delegate` and schedules a reload for the next [`Self::tick`].
    /// Returns the previous delegate.
    pub fn set_delegate(&mut self, delegate: D) -> Option<D> {
        self.reload_pending = true;
        self.delegate.replace(delegate)
    }

    pub fn delegate(&self) -> Option<&D> {
        self.delegate.as_ref()
    }

    pub fn delegate_mut(&mut self) -> Option<&mut D> {
        self.delegate.as_mut()
    }

    pub fn is_reload_pending(&self) -> bool {
        self.reload_pending
    }

    /// Current item count as reported by the delegate (`0` without one).
    pub fn item_count(&self) -> usize {
        self.delegate.as_ref().map_or(0, |d| d.item_count())
    }

    // --- layout -----------------------------------------------------------------------

    fn leading(&self) -> f32 {
        self.options.leading_padding()
    }

    fn build_geometry(&self) -> Result<(GeometryTable, Option<LoopLayout>), ScrollerError> {
        let Some(delegate) = &self.delegate else {
            return Ok((GeometryTable::new(), None));
        };
        let count = delegate.item_count();
        let base = GeometryTable::build(count, |i| delegate.item_size(i), self.options.spacing)?;
        if self.options.looping {
            if let Some((expanded, layout)) = LoopLayout::expand(&base, self.viewport_size) {
                rdebug!(
                    count,
                    expanded = expanded.len(),
                    looping = true,
                    "Scroller: geometry rebuilt"
                );
                return Ok((expanded, Some(layout)));
            }
        }
        rdebug!(count, looping = false, "Scroller: geometry rebuilt");
        Ok((base, None))
    }

    fn plan(
        geometry: &GeometryTable,
        looping: Option<&LoopLayout>,
        leading: f32,
        viewport_size: f32,
        requested: f32,
    ) -> Plan {
        let max = if geometry.is_empty() {
            0.0
        } else {
            leading + geometry.offset_before(geometry.len() - 1)
        };
        let clamp = |p: f32| if p.is_nan() { 0.0 } else { p.clamp(0.0, max) };

        let mut position = clamp(requested);
        let mut wrapped = false;
        if let Some(layout) = looping {
            if let Some(local) = layout.wrap(position - leading) {
                rtrace!(from = position, to = local + leading, "Scroller: loop wrap");
                position = clamp(local + leading);
                wrapped = true;
            }
        }
        let range = range::resolve(geometry, position, viewport_size, leading);
        Plan {
            position,
            range,
            wrapped,
        }
    }

    fn reconcile_to(
        &mut self,
        range: Option<ItemRange>,
        data_count: usize,
        mode: ReconcileMode,
    ) -> Result<(), ScrollerError> {
        match (range, self.delegate.as_mut()) {
            (Some(range), Some(delegate)) => {
                let stats = self.recycler.reconcile(
                    Some(range),
                    data_count,
                    delegate,
                    mode,
                    &mut self.transitions,
                )?;
                rtrace!(
                    start = range.start,
                    end = range.end,
                    kept = stats.kept,
                    recycled = stats.recycled,
                    reused = stats.reused,
                    created = stats.created,
                    "Scroller: reconciled"
                );
                let _ = stats;
            }
            _ => {
                self.recycler.release_all(&mut self.transitions);
            }
        }
        self.visible = range;
        self.flush_transitions();
        Ok(())
    }

    /// Replaces geometry and position atomically, then reconciles.
    fn commit_layout(
        &mut self,
        geometry: GeometryTable,
        looping: Option<LoopLayout>,
        requested: f32,
        mode: ReconcileMode,
    ) -> Result<(), ScrollerError> {
        let plan = Self::plan(
            &geometry,
            looping.as_ref(),
            self.leading(),
            self.viewport_size,
            requested,
        );
        let data_count = self.item_count();
        let mode = if data_count != self.data_count {
            ReconcileMode::Rebind
        } else {
            mode
        };
        self.reconcile_to(plan.range, data_count, mode)?;
        self.geometry = geometry;
        self.looping = looping;
        self.data_count = data_count;
        self.set_position_internal(plan.position);
        Ok(())
    }

    fn relayout(&mut self, requested: f32) -> Result<(), ScrollerError> {
        let (geometry, looping) = self.build_geometry()?;
        self.commit_layout(geometry, looping, requested, ReconcileMode::Incremental)
    }

    fn move_to(&mut self, requested: f32) -> Result<bool, ScrollerError> {
        let plan = Self::plan(
            &self.geometry,
            self.looping.as_ref(),
            self.leading(),
            self.viewport_size,
            requested,
        );
        if plan.range != self.visible {
            self.reconcile_to(plan.range, self.data_count, ReconcileMode::Incremental)?;
        }
        self.set_position_internal(plan.position);
        Ok(plan.wrapped)
    }

    fn set_position_internal(&mut self, position: f32) {
        if position == self.scroll_position {
            return;
        }
        self.scroll_position = position;
        self.emit(ScrollerEvent::Scrolled {
            position,
            normalized: self.normalized_scroll_position(),
        });
    }

    /// Rebuilds geometry from the delegate and rebinds every active view.
    ///
    /// `fraction` (`0..=1`) picks the new position: a fraction of the scrollable size, or
    /// in loop mode a fraction of one copy starting at the middle copy.
    pub fn reload_data(&mut self, fraction: f32) -> Result<(), ScrollerError> {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        let (geometry, looping) = self.build_geometry()?;
        let leading = self.leading();
        let target = match &looping {
            Some(layout) => leading + layout.first_position() + fraction * layout.copy_width(),
            None => {
                let content = leading + geometry.total_extent() + self.options.trailing_padding();
                fraction * (content - self.viewport_size).max(0.0)
            }
        };
        rdebug!(
            count = self.item_count(),
            fraction,
            target,
            "Scroller::reload_data"
        );
        self.commit_layout(geometry, looping, target, ReconcileMode::Rebind)?;
        self.reload_pending = false;
        Ok(())
    }

    /// Re-renders every active view without rebinding.
    pub fn refresh_active_views(&mut self) {
        self.recycler.refresh_all();
    }

    /// Programmatic scroll. The position is clamped (and wrapped in loop mode).
    pub fn set_scroll_position(&mut self, position: f32) -> Result<(), ScrollerError> {
        rtrace!(position, "Scroller::set_scroll_position");
        self.move_to(position).map(|_| ())
    }

    /// Feeds a host scroll update. The returned position is what the host container
    /// should show; when `wrapped` is set it differs from `position` by one copy width.
    pub fn on_scroll(
        &mut self,
        position: f32,
        velocity: f32,
    ) -> Result<ScrollUpdate, ScrollerError> {
        rtrace!(position, velocity, "Scroller::on_scroll");
        let wrapped = self.move_to(position)?;
        self.velocity = velocity;
        Ok(ScrollUpdate {
            position: self.scroll_position,
            velocity,
            wrapped,
        })
    }

    /// Updates the viewport extent. In loop mode the loop padding is recomputed and the
    /// current position kept.
    pub fn set_viewport_size(&mut self, viewport_size: f32) -> Result<(), ScrollerError> {
        let viewport_size = viewport_size.max(0.0);
        if viewport_size == self.viewport_size {
            return Ok(());
        }
        let prev = self.viewport_size;
        self.viewport_size = viewport_size;
        let result = if self.looping.is_some() {
            self.relayout(self.scroll_position)
        } else {
            self.move_to(self.scroll_position).map(|_| ())
        };
        if result.is_err() {
            self.viewport_size = prev;
        }
        result
    }

    pub fn is_looping(&self) -> bool {
        self.options.looping
    }

    /// Turns looping on or off, keeping the visible content in place.
    pub fn set_loop(&mut self, looping: bool) -> Result<(), ScrollerError> {
        if self.options.looping == looping {
            return Ok(());
        }
        let leading = self.leading();
        let current = self.scroll_position;
        let previous_layout = self.looping;

        self.options.looping = looping;
        let result = self.build_geometry().and_then(|(geometry, layout)| {
            let target = match (&layout, &previous_layout) {
                (Some(next), _) => leading + next.first_position() + (current - leading),
                (None, Some(prev)) => leading + prev.unwrap_position(current - leading),
                (None, None) => current,
            };
            rdebug!(looping, from = current, to = target, "Scroller::set_loop");
            self.commit_layout(geometry, layout, target, ReconcileMode::Incremental)
        });
        if result.is_err() {
            self.options.looping = !looping;
        }
        result
    }

    pub fn toggle_loop(&mut self) -> Result<(), ScrollerError> {
        self.set_loop(!self.options.looping)
    }

    /// Per-frame housekeeping: performs a pending reload and reports scrolling-state
    /// transitions derived from the mirrored host velocity.
    pub fn tick(&mut self) -> Result<(), ScrollerError> {
        if self.reload_pending {
            self.reload_data(0.0)?;
        }
        let moving = self.velocity != 0.0;
        if moving != self.is_scrolling {
            self.is_scrolling = moving;
            self.emit(ScrollerEvent::ScrollingChanged(moving));
        }
        Ok(())
    }

    // --- host mirrors -----------------------------------------------------------------

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: f32) {
        self.velocity = velocity;
    }

    pub fn inertia(&self) -> bool {
        self.inertia
    }

    pub fn set_inertia(&mut self, inertia: bool) {
        self.inertia = inertia;
    }

    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    // --- queries ----------------------------------------------------------------------

    pub fn scroll_position(&self) -> f32 {
        self.scroll_position
    }

    pub fn viewport_size(&self) -> f32 {
        self.viewport_size
    }

    pub fn geometry(&self) -> &GeometryTable {
        &self.geometry
    }

    pub fn loop_layout(&self) -> Option<&LoopLayout> {
        self.looping.as_ref()
    }

    /// Items plus leading and trailing padding.
    pub fn content_extent(&self) -> f32 {
        self.leading() + self.geometry.total_extent() + self.options.trailing_padding()
    }

    /// Scrollable distance: content extent minus viewport, never negative.
    pub fn scroll_size(&self) -> f32 {
        (self.content_extent() - self.viewport_size).max(0.0)
    }

    /// Largest reachable position: the start of the last item.
    pub fn max_scroll_position(&self) -> f32 {
        match self.geometry.len() {
            0 => 0.0,
            n => self.leading() + self.geometry.offset_before(n - 1),
        }
    }

    pub fn normalized_scroll_position(&self) -> f32 {
        self.options
            .axis
            .normalized_from_position(self.scroll_position, self.scroll_size())
    }

    pub fn position(&self, view_index: usize, edge: ItemEdge) -> f32 {
        match edge {
            ItemEdge::Before => self.position_before(view_index),
            ItemEdge::After => self.position_after(view_index),
        }
    }

    pub fn position_before(&self, view_index: usize) -> f32 {
        self.leading() + self.geometry.offset_before(view_index)
    }

    pub fn position_after(&self, view_index: usize) -> f32 {
        self.leading() + self.geometry.offset_after(view_index)
    }

    /// View index of `data_index`: itself, or its slot in the middle copy when looping.
    pub fn view_index_for_data(&self, data_index: usize) -> usize {
        match &self.looping {
            Some(layout) => layout.middle_view_index(data_index),
            None => data_index,
        }
    }

    pub fn position_for_data_index(&self, data_index: usize, edge: ItemEdge) -> f32 {
        self.position(self.view_index_for_data(data_index), edge)
    }

    pub fn view_index_at_position(&self, position: f32) -> usize {
        self.geometry.index_at_position(position - self.leading())
    }

    pub fn data_index_for_view(&self, view_index: usize) -> usize {
        match self.data_count {
            0 => 0,
            n => view_index % n,
        }
    }

    /// Size of `view_index` in the (possibly expanded) sequence.
    pub fn item_size(&self, view_index: usize) -> f32 {
        self.geometry.size(view_index)
    }

    /// Size of `data_index` as last reported by the delegate.
    pub fn data_item_size(&self, data_index: usize) -> f32 {
        self.geometry.size(data_index)
    }

    pub fn item_span(&self, view_index: usize) -> Option<ItemSpan> {
        if view_index >= self.geometry.len() {
            return None;
        }
        Some(ItemSpan {
            view_index,
            start: self.position_before(view_index),
            size: self.geometry.size(view_index),
        })
    }

    /// Spacer sizes around the realized block. `leading` is where the first active view
    /// starts; `trailing` runs from the end of the last active view to the content end.
    pub fn layout(&self) -> SpacerLayout {
        let content_extent = self.content_extent();
        match self.visible {
            Some(range) => SpacerLayout {
                leading: self.position_before(range.start),
                trailing: content_extent - self.position_after(range.end),
                content_extent,
            },
            None => SpacerLayout {
                leading: self.leading(),
                trailing: self.options.trailing_padding(),
                content_extent,
            },
        }
    }

    pub fn scrollbar_visible(&self) -> bool {
        let fits = self.geometry.total_extent() < self.viewport_size;
        if fits || self.looping.is_some() {
            self.options.scrollbar_visibility == ScrollbarVisibility::Always
        } else {
            self.options.scrollbar_visibility != ScrollbarVisibility::Never
        }
    }

    pub fn visible_range(&self) -> Option<ItemRange> {
        self.visible
    }

    pub fn start_view_index(&self) -> Option<usize> {
        self.visible.map(|r| r.start)
    }

    pub fn end_view_index(&self) -> Option<usize> {
        self.visible.map(|r| r.end)
    }

    pub fn start_data_index(&self) -> Option<usize> {
        self.start_view_index().map(|i| self.data_index_for_view(i))
    }

    pub fn end_data_index(&self) -> Option<usize> {
        self.end_view_index().map(|i| self.data_index_for_view(i))
    }

    // --- views ------------------------------------------------------------------------

    pub fn active_views(&self) -> impl Iterator<Item = &ActiveView<D::View>> {
        self.recycler.active().iter()
    }

    pub fn active_views_mut(&mut self) -> impl Iterator<Item = &mut ActiveView<D::View>> {
        self.recycler.active_mut()
    }

    pub fn active_len(&self) -> usize {
        self.recycler.active().len()
    }

    /// The active view bound to `data_index`. In loop mode several copies may be active;
    /// the one with the lowest view index is returned.
    pub fn active_view_for_data(&self, data_index: usize) -> Option<&ActiveView<D::View>> {
        self.recycler.find_data(data_index)
    }

    pub fn pool(&self) -> &RecyclePool<D::View> {
        self.recycler.pool()
    }

    /// Drops every active view out of the engine without pooling it.
    ///
    /// The next scroll or reload rebuilds the visible views.
    pub fn clear_active(&mut self) -> Vec<D::View> {
        self.visible = None;
        self.recycler.clear_active()
    }

    /// Empties the pool.
    pub fn clear_recycled(&mut self) -> Vec<D::View> {
        self.recycler.pool_mut().drain()
    }

    pub fn clear_all(&mut self) -> Vec<D::View> {
        let mut views = self.clear_active();
        views.append(&mut self.clear_recycled());
        views
    }
}

impl<D> core::fmt::Debug for Scroller<D>
where
    D: ScrollDelegate,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Scroller")
            .field("options", &self.options)
            .field("has_delegate", &self.delegate.is_some())
            .field("viewport_size", &self.viewport_size)
            .field("scroll_position", &self.scroll_position)
            .field("velocity", &self.velocity)
            .field("items", &self.geometry.len())
            .field("looping", &self.looping)
            .field("visible", &self.visible)
            .field("active", &self.recycler.active().len())
            .field("pooled", &self.recycler.pool().len())
            .finish_non_exhaustive()
    }
}
