use crate::*;

use alloc::boxed::Box;
use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use proptest::prelude::*;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        let span = end_exclusive - start;
        start + (self.next_u64() % span)
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }

    fn gen_f32(&mut self, start: f32, end: f32) -> f32 {
        let unit = (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32;
        start + (end - start) * unit
    }
}

#[derive(Debug)]
struct TestView {
    id: usize,
    kind: ViewKind,
    data: Option<usize>,
    binds: usize,
    refreshes: usize,
    recycles: usize,
}

impl ViewHandle for TestView {
    fn kind(&self) -> ViewKind {
        self.kind
    }

    fn set_data(&mut self, data_index: usize) {
        self.data = Some(data_index);
        self.binds += 1;
    }

    fn refresh(&mut self) {
        self.refreshes += 1;
    }

    fn will_recycle(&mut self) {
        self.recycles += 1;
    }
}

#[derive(Debug, thiserror::Error)]
#[error("factory refused data index {0}")]
struct Refused(usize);

struct TestDelegate {
    sizes: Vec<f32>,
    created: Arc<AtomicUsize>,
    fail_on: Option<usize>,
    wrong_kind: bool,
    kind_of: fn(usize) -> ViewKind,
}

impl TestDelegate {
    fn uniform(count: usize, size: f32) -> Self {
        Self::with_sizes(vec![size; count])
    }

    fn with_sizes(sizes: Vec<f32>) -> Self {
        Self {
            sizes,
            created: Arc::new(AtomicUsize::new(0)),
            fail_on: None,
            wrong_kind: false,
            kind_of: |_| ViewKind::DEFAULT,
        }
    }
}

impl ScrollDelegate for TestDelegate {
    type View = TestView;

    fn item_count(&self) -> usize {
        self.sizes.len()
    }

    fn item_size(&self, data_index: usize) -> f32 {
        self.sizes[data_index]
    }

    fn view_kind(&self, data_index: usize) -> ViewKind {
        (self.kind_of)(data_index)
    }

    fn create_view(
        &mut self,
        kind: ViewKind,
        data_index: usize,
        _view_index: usize,
    ) -> Result<TestView, BoxError> {
        if self.fail_on == Some(data_index) {
            return Err(Box::new(Refused(data_index)));
        }
        let id = self.created.fetch_add(1, Ordering::Relaxed);
        let kind = if self.wrong_kind {
            ViewKind(kind.0 + 1)
        } else {
            kind
        };
        Ok(TestView {
            id,
            kind,
            data: None,
            binds: 0,
            refreshes: 0,
            recycles: 0,
        })
    }
}

fn recorder() -> (Arc<Mutex<Vec<ScrollerEvent>>>, ScrollerOptions) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let opts = ScrollerOptions::new().with_on_event(Some(move |e: &ScrollerEvent| {
        sink.lock().unwrap().push(*e);
    }));
    (events, opts)
}

fn scroller(
    opts: ScrollerOptions,
    delegate: TestDelegate,
    viewport: f32,
) -> Scroller<TestDelegate> {
    let mut s = Scroller::with_delegate(opts, delegate);
    s.set_viewport_size(viewport).unwrap();
    s.reload_data(0.0).unwrap();
    s
}

fn active_indexes(s: &Scroller<TestDelegate>) -> Vec<usize> {
    s.active_views().map(|e| e.view_index()).collect()
}

fn active_ids(s: &Scroller<TestDelegate>) -> Vec<usize> {
    s.active_views().map(|e| e.view().id).collect()
}

#[test]
fn geometry_offsets_fold_spacing_into_the_following_item() {
    let t = GeometryTable::from_sizes(vec![10.0, 20.0, 30.0], 5.0).unwrap();
    assert_eq!(t.len(), 3);
    assert_eq!(t.offset_before(0), 0.0);
    assert_eq!(t.offset_after(0), 10.0);
    assert_eq!(t.offset_before(1), 15.0);
    assert_eq!(t.offset_after(1), 35.0);
    assert_eq!(t.offset_before(2), 40.0);
    assert_eq!(t.total_extent(), 70.0);

    // Out-of-range queries clamp to the last item.
    assert_eq!(t.offset_before(99), 40.0);
    assert_eq!(t.offset_after(99), 70.0);
    assert_eq!(t.size(99), 0.0);
}

#[test]
fn geometry_index_at_position_is_strict_on_item_ends() {
    let t = GeometryTable::from_sizes(vec![10.0, 20.0, 30.0], 5.0).unwrap();
    assert_eq!(t.index_at_position(-3.0), 0);
    assert_eq!(t.index_at_position(0.0), 0);
    assert_eq!(t.index_at_position(9.9), 0);
    // The end of item 0 and the gap after it belong to item 1.
    assert_eq!(t.index_at_position(10.0), 1);
    assert_eq!(t.index_at_position(12.0), 1);
    assert_eq!(t.index_at_position(15.0), 1);
    assert_eq!(t.index_at_position(35.0), 2);
    assert_eq!(t.index_at_position(70.0), 2);
    assert_eq!(t.index_at_position(1e9), 2);
}

#[test]
fn geometry_skips_zero_size_items_on_lookup() {
    let t = GeometryTable::from_sizes(vec![10.0, 0.0, 10.0, 0.0], 0.0).unwrap();
    assert_eq!(t.index_at_position(10.0), 2);
    assert_eq!(t.index_at_position(20.0), 3);
}

#[test]
fn geometry_empty_table() {
    let t = GeometryTable::new();
    assert!(t.is_empty());
    assert_eq!(t.total_extent(), 0.0);
    assert_eq!(t.offset_before(0), 0.0);
    assert_eq!(t.offset_after(5), 0.0);
    assert_eq!(t.index_at_position(100.0), 0);
    assert_eq!(range::resolve(&t, 0.0, 500.0, 0.0), None);
}

#[test]
fn geometry_rebuild_queries_each_size_once_in_order() {
    let mut seen = Vec::new();
    let t = GeometryTable::build(
        4,
        |i| {
            seen.push(i);
            1.0
        },
        0.0,
    )
    .unwrap();
    assert_eq!(seen, vec![0, 1, 2, 3]);
    assert_eq!(t.total_extent(), 4.0);
}

#[test]
fn geometry_rebuild_rejects_invalid_sizes_and_keeps_previous_table() {
    let mut t = GeometryTable::from_sizes(vec![1.0, 2.0], 0.0).unwrap();
    let before = t.clone();

    let err = t
        .rebuild(3, |i| if i == 1 { -4.0 } else { 1.0 }, 0.0)
        .unwrap_err();
    assert!(matches!(
        err,
        ScrollerError::InvalidItemSize { index: 1, size } if size == -4.0
    ));
    assert_eq!(t, before);

    let err = t.rebuild(1, |_| f32::NAN, 0.0).unwrap_err();
    assert!(matches!(err, ScrollerError::InvalidItemSize { index: 0, .. }));
    assert!(matches!(
        t.rebuild(2, |_| 1.0, -1.0),
        Err(ScrollerError::InvalidSpacing { .. })
    ));
    assert_eq!(t, before);
}

#[test]
fn resolve_uniform_list_scenario() {
    let t = GeometryTable::build(1000, |_| 100.0, 0.0).unwrap();
    assert_eq!(
        range::resolve(&t, 0.0, 500.0, 0.0),
        Some(ItemRange::new(0, 5))
    );
    assert_eq!(
        range::resolve(&t, 250.0, 500.0, 0.0),
        Some(ItemRange::new(2, 7))
    );
    // A zero viewport still realizes the item under the position.
    assert_eq!(
        range::resolve(&t, 250.0, 0.0, 0.0),
        Some(ItemRange::new(2, 2))
    );
    // Leading padding shifts the lookup.
    assert_eq!(
        range::resolve(&t, 50.0, 500.0, 50.0),
        Some(ItemRange::new(0, 5))
    );
}

#[test]
fn loop_layout_pads_short_lists_then_triples() {
    let base = GeometryTable::from_sizes(vec![100.0; 3], 0.0).unwrap();
    let (table, layout) = LoopLayout::expand(&base, 500.0).unwrap();

    assert_eq!(layout.data_count(), 3);
    assert_eq!(layout.copy_len(), 6);
    assert_eq!(table.len(), 18);
    assert_eq!(layout.middle_start(), 6);
    assert_eq!(layout.middle_end(), 11);
    assert_eq!(layout.copy_width(), 600.0);
    assert_eq!(layout.first_position(), 600.0);
    assert_eq!(layout.last_position(), 700.0);
    assert_eq!(layout.first_trigger(), 100.0);
    assert_eq!(layout.last_trigger(), 1200.0);
    assert!(layout.last_trigger() - layout.first_trigger() >= 500.0);

    assert_eq!(layout.data_index(13), 1);
    assert_eq!(layout.middle_view_index(2), 8);
}

#[test]
fn loop_layout_with_spacing_wraps_by_one_copy_width() {
    let base = GeometryTable::from_sizes(vec![100.0; 3], 10.0).unwrap();
    let (table, layout) = LoopLayout::expand(&base, 500.0).unwrap();

    assert_eq!(layout.copy_len(), 6);
    assert_eq!(layout.copy_width(), 660.0);
    assert_eq!(layout.first_position(), table.offset_before(6) + 5.0);
    assert_eq!(layout.first_trigger(), layout.first_position() - 500.0);
    assert_eq!(
        layout.last_trigger(),
        table.offset_after(11) + 5.0,
        "the last trigger fires once the middle copy has fully left the viewport"
    );

    let below = layout.first_trigger() - 1.0;
    assert_eq!(layout.wrap(below), Some(below + 660.0));
    let above = layout.last_trigger() + 1.0;
    assert_eq!(layout.wrap(above), Some(above - 660.0));
    assert_eq!(layout.wrap(layout.first_position()), None);

    assert_eq!(layout.wrap_directed(below, true), None);
    assert_eq!(layout.wrap_directed(above, true), Some(above - 660.0));
}

#[test]
fn loop_layout_of_empty_or_flat_list() {
    assert!(LoopLayout::expand(&GeometryTable::new(), 100.0).is_none());

    let flat = GeometryTable::from_sizes(vec![0.0; 2], 0.0).unwrap();
    let (table, layout) = LoopLayout::expand(&flat, 100.0).unwrap();
    assert_eq!(layout.copy_len(), 2);
    assert_eq!(table.len(), 6);
}

#[test]
fn pool_is_lifo_per_kind() {
    let mut pool = RecyclePool::new();
    let view = |id, kind| TestView {
        id,
        kind: ViewKind(kind),
        data: None,
        binds: 0,
        refreshes: 0,
        recycles: 0,
    };
    pool.put(view(1, 0));
    pool.put(view(2, 1));
    pool.put(view(3, 0));
    assert_eq!(pool.len(), 3);
    assert_eq!(pool.len_of(ViewKind(0)), 2);

    assert_eq!(pool.take(ViewKind(0)).map(|v| v.id), Some(3));
    assert_eq!(pool.take(ViewKind(0)).map(|v| v.id), Some(1));
    assert!(pool.take(ViewKind(0)).is_none());
    assert!(pool.take(ViewKind(7)).is_none());

    let rest = pool.drain();
    assert_eq!(rest.len(), 1);
    assert!(pool.is_empty());
}

#[test]
fn no_delegate_renders_nothing() {
    let mut s: Scroller<TestDelegate> = Scroller::new(ScrollerOptions::new());
    assert_eq!(s.item_count(), 0);
    s.set_viewport_size(300.0).unwrap();
    s.tick().unwrap();
    s.reload_data(0.5).unwrap();
    assert_eq!(s.visible_range(), None);
    assert_eq!(s.active_len(), 0);
    assert_eq!(s.content_extent(), 0.0);
    assert_eq!(s.set_scroll_position(100.0).ok(), Some(()));
    assert_eq!(s.scroll_position(), 0.0);
}

#[test]
fn uniform_list_realizes_visible_items_and_recycles_on_scroll() {
    let delegate = TestDelegate::uniform(1000, 100.0);
    let created = Arc::clone(&delegate.created);
    let mut s = scroller(ScrollerOptions::new(), delegate, 500.0);

    assert_eq!(s.visible_range(), Some(ItemRange::new(0, 5)));
    assert_eq!(active_indexes(&s), vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(created.load(Ordering::Relaxed), 6);

    s.set_scroll_position(250.0).unwrap();
    assert_eq!(s.visible_range(), Some(ItemRange::new(2, 7)));
    assert_eq!(active_indexes(&s), vec![2, 3, 4, 5, 6, 7]);
    // Items 0 and 1 were recycled into 6 and 7.
    assert_eq!(created.load(Ordering::Relaxed), 6);
    assert!(s.pool().is_empty());

    for entry in s.active_views() {
        assert_eq!(entry.view().data, Some(entry.data_index()));
        assert_eq!(entry.view_index(), entry.data_index());
    }

    let last = s.active_view_for_data(7).unwrap();
    assert_eq!(last.view().recycles, 1);
}

#[test]
fn scroll_position_is_clamped_to_the_start_of_the_last_item() {
    let mut s = scroller(
        ScrollerOptions::new(),
        TestDelegate::uniform(1000, 100.0),
        500.0,
    );
    assert_eq!(s.max_scroll_position(), 99_900.0);

    s.set_scroll_position(1e9).unwrap();
    assert_eq!(s.scroll_position(), 99_900.0);
    assert_eq!(s.visible_range(), Some(ItemRange::new(999, 999)));

    s.set_scroll_position(-50.0).unwrap();
    assert_eq!(s.scroll_position(), 0.0);
}

#[test]
fn unchanged_range_is_a_zero_diff_reconcile() {
    let (events, opts) = recorder();
    let delegate = TestDelegate::uniform(100, 100.0);
    let created = Arc::clone(&delegate.created);
    let mut s = scroller(opts, delegate, 500.0);
    let ids = active_ids(&s);
    events.lock().unwrap().clear();

    s.set_scroll_position(40.0).unwrap();
    s.set_scroll_position(40.0).unwrap();

    assert_eq!(active_ids(&s), ids);
    assert_eq!(created.load(Ordering::Relaxed), 6);
    let events = events.lock().unwrap();
    assert!(
        events
            .iter()
            .all(|e| matches!(e, ScrollerEvent::Scrolled { .. })),
        "{events:?}"
    );
    assert_eq!(events.len(), 1);
}

#[test]
fn randomized_scrolls_keep_exact_active_set_with_one_notification_per_transition() {
    for seed in 0..32u64 {
        let mut rng = Lcg::new(seed);
        let count = rng.gen_range_usize(1, 200);
        let spacing = rng.gen_f32(0.0, 8.0);
        let sizes: Vec<f32> = (0..count).map(|_| rng.gen_f32(1.0, 60.0)).collect();
        let viewport = rng.gen_f32(0.0, 400.0);

        let (events, opts) = recorder();
        let opts = opts.with_spacing(spacing);
        let mut s = scroller(opts, TestDelegate::with_sizes(sizes), viewport);

        let mut live = BTreeSet::new();
        let mut drain = |live: &mut BTreeSet<usize>| {
            for e in events.lock().unwrap().drain(..) {
                if let ScrollerEvent::ViewVisibilityChanged(t) = e {
                    if t.active {
                        assert!(live.insert(t.view_index), "seed={seed} double activate");
                    } else {
                        assert!(live.remove(&t.view_index), "seed={seed} double recycle");
                    }
                }
            }
        };
        drain(&mut live);

        for _ in 0..64 {
            let max = s.max_scroll_position();
            let pos = rng.gen_f32(-50.0, max + 50.0);
            s.set_scroll_position(pos).unwrap();
            drain(&mut live);

            let range = s.visible_range().unwrap();
            let expected: Vec<usize> = (range.start..=range.end).collect();
            assert_eq!(active_indexes(&s), expected, "seed={seed} pos={pos}");
            assert_eq!(live.iter().copied().collect::<Vec<_>>(), expected);
            assert_eq!(
                Some(range),
                range::resolve(s.geometry(), s.scroll_position(), viewport, 0.0)
            );
        }
    }
}

#[test]
fn will_recycle_precedes_the_visibility_change() {
    let (events, opts) = recorder();
    let mut s = scroller(opts, TestDelegate::uniform(50, 100.0), 250.0);
    events.lock().unwrap().clear();

    s.set_scroll_position(100.0).unwrap();

    let events = events.lock().unwrap();
    let t0 = ViewTransition {
        view_index: 0,
        data_index: 0,
        kind: ViewKind::DEFAULT,
        active: false,
    };
    let t3 = ViewTransition {
        view_index: 3,
        data_index: 3,
        kind: ViewKind::DEFAULT,
        active: true,
    };
    assert_eq!(
        events.as_slice(),
        &[
            ScrollerEvent::ViewWillRecycle(t0),
            ScrollerEvent::ViewVisibilityChanged(t0),
            ScrollerEvent::ViewVisibilityChanged(t3),
            ScrollerEvent::Scrolled {
                position: 100.0,
                normalized: 1.0 - 100.0 / (5000.0 - 250.0),
            },
        ]
    );
}

#[test]
fn views_recycle_only_into_matching_kinds() {
    let mut delegate = TestDelegate::uniform(40, 100.0);
    delegate.kind_of = |i| ViewKind((i % 2) as u32);
    let created = Arc::clone(&delegate.created);
    let mut s = scroller(ScrollerOptions::new(), delegate, 150.0);
    assert_eq!(active_indexes(&s), vec![0, 1]);

    s.set_scroll_position(200.0).unwrap();
    assert_eq!(active_indexes(&s), vec![2, 3]);
    assert_eq!(created.load(Ordering::Relaxed), 2);
    for entry in s.active_views() {
        assert_eq!(entry.kind(), ViewKind((entry.data_index() % 2) as u32));
        assert_eq!(entry.view().kind, entry.kind());
    }

    s.set_scroll_position(300.0).unwrap();
    // Only item 2 (kind 0) left; item 4 reuses it.
    assert_eq!(active_indexes(&s), vec![3, 4]);
    assert_eq!(created.load(Ordering::Relaxed), 2);
}

#[test]
fn factory_failure_rolls_back_the_whole_pass() {
    let (events, opts) = recorder();
    let mut delegate = TestDelegate::uniform(40, 100.0);
    delegate.kind_of = |i| if i == 5 { ViewKind(1) } else { ViewKind::DEFAULT };
    delegate.fail_on = Some(5);
    let mut s = scroller(opts, delegate, 250.0);
    assert_eq!(active_indexes(&s), vec![0, 1, 2]);
    let ids = active_ids(&s);
    events.lock().unwrap().clear();

    let err = s.set_scroll_position(300.0).unwrap_err();
    assert!(matches!(
        err,
        ScrollerError::ViewFactory {
            data_index: 5,
            view_index: 5,
            ..
        }
    ));
    assert_eq!(s.scroll_position(), 0.0);
    assert_eq!(s.visible_range(), Some(ItemRange::new(0, 2)));
    assert_eq!(active_indexes(&s), vec![0, 1, 2]);
    assert_eq!(active_ids(&s), ids);
    for entry in s.active_views() {
        assert_eq!(entry.view().data, Some(entry.data_index()));
    }
    assert!(s.pool().is_empty());
    assert!(events.lock().unwrap().is_empty());

    s.delegate_mut().unwrap().fail_on = None;
    s.set_scroll_position(300.0).unwrap();
    assert_eq!(active_indexes(&s), vec![3, 4, 5]);
}

#[test]
fn growing_viewport_with_failing_factory_restores_viewport() {
    let mut delegate = TestDelegate::uniform(40, 100.0);
    delegate.fail_on = Some(4);
    let created = Arc::clone(&delegate.created);
    let mut s = scroller(ScrollerOptions::new(), delegate, 250.0);

    assert!(s.set_viewport_size(450.0).is_err());
    assert_eq!(s.viewport_size(), 250.0);
    assert_eq!(active_indexes(&s), vec![0, 1, 2]);
    // The view built for item 3 before the failure waits in the pool.
    assert_eq!(created.load(Ordering::Relaxed), 4);
    assert_eq!(s.pool().len(), 1);
}

#[test]
fn mismatched_view_kind_is_rejected() {
    let mut delegate = TestDelegate::uniform(10, 100.0);
    delegate.wrong_kind = true;
    let mut s = Scroller::with_delegate(ScrollerOptions::new(), delegate);
    s.set_viewport_size(100.0).unwrap();

    let err = s.reload_data(0.0).unwrap_err();
    assert!(matches!(
        err,
        ScrollerError::ViewKindMismatch {
            data_index: 0,
            expected: ViewKind(0),
            found: ViewKind(1),
        }
    ));
    assert_eq!(s.active_len(), 0);
    assert!(s.is_reload_pending());
}

#[test]
fn invalid_size_on_reload_keeps_previous_state() {
    let mut s = scroller(
        ScrollerOptions::new(),
        TestDelegate::uniform(20, 100.0),
        250.0,
    );
    s.set_scroll_position(500.0).unwrap();
    let ids = active_ids(&s);

    s.delegate_mut().unwrap().sizes[3] = -1.0;
    let err = s.reload_data(0.0).unwrap_err();
    assert!(matches!(err, ScrollerError::InvalidItemSize { index: 3, .. }));
    assert_eq!(s.scroll_position(), 500.0);
    assert_eq!(active_ids(&s), ids);
    assert_eq!(s.geometry().len(), 20);
}

#[test]
fn reload_rebinds_active_views_and_applies_fraction() {
    let mut s = scroller(
        ScrollerOptions::new(),
        TestDelegate::uniform(10, 100.0),
        500.0,
    );
    let binds: Vec<usize> = s.active_views().map(|e| e.view().binds).collect();
    assert!(binds.iter().all(|&b| b == 1));

    s.delegate_mut().unwrap().sizes = vec![50.0; 20];
    s.reload_data(0.5).unwrap();
    assert_eq!(s.scroll_position(), 250.0);
    assert_eq!(s.visible_range(), Some(ItemRange::new(5, 15)));
    assert_eq!(s.active_len(), 11);
}

#[test]
fn tick_performs_deferred_reload_and_reports_scrolling_state() {
    let (events, opts) = recorder();
    let mut s = Scroller::with_delegate(opts, TestDelegate::uniform(10, 100.0));
    s.set_viewport_size(300.0).unwrap();
    assert!(s.is_reload_pending());
    assert_eq!(s.active_len(), 0);

    s.tick().unwrap();
    assert!(!s.is_reload_pending());
    assert_eq!(active_indexes(&s), vec![0, 1, 2, 3]);

    events.lock().unwrap().clear();
    s.on_scroll(20.0, 4.0).unwrap();
    s.tick().unwrap();
    s.tick().unwrap();
    s.set_velocity(0.0);
    s.tick().unwrap();

    let changes: Vec<bool> = events
        .lock()
        .unwrap()
        .iter()
        .filter_map(|e| match e {
            ScrollerEvent::ScrollingChanged(b) => Some(*b),
            _ => None,
        })
        .collect();
    assert_eq!(changes, vec![true, false]);
    assert!(!s.is_scrolling());
}

#[test]
fn looping_scroll_wraps_by_one_copy_and_keeps_velocity() {
    let opts = ScrollerOptions::new().with_looping(true);
    let mut s = scroller(opts, TestDelegate::uniform(3, 100.0), 500.0);
    let layout = *s.loop_layout().unwrap();
    assert_eq!(s.geometry().len(), 18);
    assert_eq!(s.scroll_position(), 600.0);
    assert!(!s.scrollbar_visible());

    let up = s.on_scroll(50.0, -3.5).unwrap();
    assert!(up.wrapped);
    assert_eq!(up.position, 650.0);
    assert_eq!(up.velocity, -3.5);
    assert_eq!(s.velocity(), -3.5);

    let down = s.on_scroll(1250.0, 2.0).unwrap();
    assert!(down.wrapped);
    assert_eq!(down.position, 1250.0 - layout.copy_width());

    let inside = s.on_scroll(700.0, 0.0).unwrap();
    assert!(!inside.wrapped);

    for entry in s.active_views() {
        assert_eq!(entry.data_index(), entry.view_index() % 3);
        assert_eq!(entry.view().data, Some(entry.data_index()));
    }
}

#[test]
fn looping_data_lookups_target_the_middle_copy() {
    let opts = ScrollerOptions::new().with_looping(true);
    let s = scroller(opts, TestDelegate::uniform(10, 100.0), 300.0);
    let layout = s.loop_layout().unwrap();
    assert_eq!(layout.copy_len(), 10);
    assert_eq!(s.view_index_for_data(4), 14);
    assert_eq!(s.position_for_data_index(4, ItemEdge::Before), 1400.0);
    assert_eq!(s.data_item_size(4), 100.0);
    assert_eq!(s.start_data_index(), Some(0));
}

#[test]
fn toggling_loop_preserves_the_visible_content() {
    let mut s = scroller(
        ScrollerOptions::new(),
        TestDelegate::uniform(10, 100.0),
        300.0,
    );
    s.set_scroll_position(250.0).unwrap();
    assert_eq!(s.start_data_index(), Some(2));

    s.toggle_loop().unwrap();
    assert!(s.is_looping());
    assert_eq!(s.scroll_position(), 1250.0);
    assert_eq!(s.start_view_index(), Some(12));
    assert_eq!(s.start_data_index(), Some(2));

    s.toggle_loop().unwrap();
    assert!(!s.is_looping());
    assert!(s.loop_layout().is_none());
    assert_eq!(s.scroll_position(), 250.0);
    assert_eq!(active_indexes(&s), vec![2, 3, 4, 5]);
}

#[test]
fn viewport_change_while_looping_reexpands() {
    let opts = ScrollerOptions::new().with_looping(true);
    let mut s = scroller(opts, TestDelegate::uniform(3, 100.0), 250.0);
    assert_eq!(s.loop_layout().unwrap().copy_len(), 3);

    s.set_viewport_size(500.0).unwrap();
    let layout = s.loop_layout().unwrap();
    assert_eq!(layout.copy_len(), 6);
    assert_eq!(s.geometry().len(), 18);
    let range = s.visible_range().unwrap();
    assert_eq!(active_indexes(&s), (range.start..=range.end).collect::<Vec<_>>());
}

#[test]
fn padding_shifts_geometry_and_spacers() {
    let opts = ScrollerOptions::new()
        .with_spacing(10.0)
        .with_padding(EdgePadding {
            top: 20.0,
            bottom: 30.0,
            left: 0.0,
            right: 0.0,
        });
    let mut s = scroller(opts, TestDelegate::uniform(10, 100.0), 250.0);

    assert_eq!(s.content_extent(), 20.0 + 1090.0 + 30.0);
    assert_eq!(s.position_before(0), 20.0);
    assert_eq!(s.position_before(1), 130.0);
    assert_eq!(s.view_index_at_position(130.0), 1);
    assert_eq!(s.view_index_at_position(125.0), 1);
    assert_eq!(s.view_index_at_position(119.0), 0);

    let span = s.item_span(1).unwrap();
    assert_eq!((span.start, span.end()), (130.0, 230.0));
    assert!(s.item_span(10).is_none());

    s.set_scroll_position(240.0).unwrap();
    let range = s.visible_range().unwrap();
    assert_eq!(range, ItemRange::new(2, 4));
    let layout = s.layout();
    assert_eq!(layout.leading, s.position_before(2));
    assert_eq!(layout.trailing, s.content_extent() - s.position_after(4));
}

#[test]
fn horizontal_axis_uses_left_and_right_padding() {
    let opts = ScrollerOptions::new()
        .with_axis(ScrollAxis::Horizontal)
        .with_padding(EdgePadding {
            top: 99.0,
            bottom: 99.0,
            left: 5.0,
            right: 7.0,
        });
    let mut s = scroller(opts, TestDelegate::uniform(10, 10.0), 50.0);
    assert_eq!(s.content_extent(), 112.0);

    s.set_scroll_position(31.0).unwrap();
    let expected = 31.0 / (112.0 - 50.0);
    assert!((s.normalized_scroll_position() - expected).abs() < 1e-6);
}

#[test]
fn axis_normalization_inverts_vertical() {
    let v = ScrollAxis::Vertical;
    assert_eq!(v.normalized_from_position(0.0, 100.0), 1.0);
    assert_eq!(v.normalized_from_position(100.0, 100.0), 0.0);
    assert_eq!(v.position_from_normalized(0.25, 100.0), 75.0);

    let h = ScrollAxis::Horizontal;
    assert_eq!(h.normalized_from_position(25.0, 100.0), 0.25);
    assert_eq!(h.position_from_normalized(0.25, 100.0), 25.0);
    assert_eq!(h.normalized_from_position(25.0, 0.0), 0.0);
}

#[test]
fn scrollbar_visibility_policy() {
    let fits = TestDelegate::uniform(2, 100.0);
    let mut s = scroller(ScrollerOptions::new(), fits, 500.0);
    assert!(!s.scrollbar_visible());
    s.update_options(|o| o.scrollbar_visibility = ScrollbarVisibility::Always)
        .unwrap();
    assert!(s.scrollbar_visible());

    let overflows = TestDelegate::uniform(20, 100.0);
    let mut s = scroller(ScrollerOptions::new(), overflows, 500.0);
    assert!(s.scrollbar_visible());
    s.update_options(|o| o.scrollbar_visibility = ScrollbarVisibility::Never)
        .unwrap();
    assert!(!s.scrollbar_visible());
}

#[test]
fn set_options_relayouts_on_spacing_change() {
    let mut s = scroller(
        ScrollerOptions::new(),
        TestDelegate::uniform(10, 100.0),
        250.0,
    );
    s.update_options(|o| o.spacing = 50.0).unwrap();
    assert_eq!(s.geometry().total_extent(), 1450.0);

    let err = s.update_options(|o| o.spacing = -1.0).unwrap_err();
    assert!(matches!(err, ScrollerError::InvalidSpacing { .. }));
    assert_eq!(s.options().spacing, 50.0);

    s.update_options(|o| o.looping = true).unwrap();
    assert!(s.loop_layout().is_some());
}

#[test]
fn clearing_hands_views_back_to_the_host() {
    let mut s = scroller(
        ScrollerOptions::new(),
        TestDelegate::uniform(100, 100.0),
        250.0,
    );
    s.set_viewport_size(150.0).unwrap();
    assert_eq!(s.active_len(), 2);
    assert_eq!(s.pool().len(), 1);

    let pooled = s.clear_recycled();
    assert_eq!(pooled.len(), 1);
    assert_eq!(pooled[0].recycles, 1);

    let all = s.clear_all();
    assert_eq!(all.len(), 2);
    assert_eq!(s.active_len(), 0);
    assert_eq!(s.visible_range(), None);

    // The next scroll realizes the range again.
    s.set_scroll_position(0.0).unwrap();
    assert_eq!(active_indexes(&s), vec![0, 1]);
}

#[test]
fn refresh_active_views_does_not_rebind() {
    let mut s = scroller(
        ScrollerOptions::new(),
        TestDelegate::uniform(10, 100.0),
        150.0,
    );
    s.refresh_active_views();
    for entry in s.active_views() {
        assert_eq!(entry.view().refreshes, 1);
        assert_eq!(entry.view().binds, 1);
    }
}

#[test]
fn error_messages_carry_diagnostics() {
    let err = ScrollerError::InvalidItemSize {
        index: 4,
        size: -2.0,
    };
    let msg: String = alloc::format!("{err}");
    assert!(msg.contains("item 4"));
    assert!(msg.contains("-2"));
}

proptest! {
    #[test]
    fn geometry_offsets_are_monotonic_and_total(
        sizes in prop::collection::vec(0.0f32..100.0, 0..200),
        spacing in 0.0f32..10.0,
    ) {
        let t = GeometryTable::from_sizes(sizes.clone(), spacing).unwrap();
        prop_assert_eq!(t.len(), sizes.len());
        if let Some(last) = sizes.len().checked_sub(1) {
            prop_assert_eq!(t.offset_after(last), t.total_extent());
        } else {
            prop_assert_eq!(t.total_extent(), 0.0);
        }
        for i in 1..sizes.len() {
            prop_assert!(t.offset_before(i) >= t.offset_after(i - 1));
            prop_assert!(t.offset_after(i) >= t.offset_before(i));
        }
    }

    #[test]
    fn geometry_lookup_inverts_offsets(
        sizes in prop::collection::vec(1.0f32..100.0, 1..200),
        spacing in 0.0f32..10.0,
    ) {
        let t = GeometryTable::from_sizes(sizes.clone(), spacing).unwrap();
        for (i, &size) in sizes.iter().enumerate() {
            prop_assert_eq!(t.index_at_position(t.offset_before(i)), i);
            prop_assert_eq!(t.index_at_position(t.offset_after(i) - size * 0.5), i);
        }
    }
}
