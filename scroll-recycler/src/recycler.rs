use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::{ItemRange, RecyclePool, ScrollDelegate, ScrollerError, ViewHandle, ViewKind};

/// A realized view bound to one slot of the list.
#[derive(Debug)]
pub struct ActiveView<V> {
    view: V,
    view_index: usize,
    data_index: usize,
    kind: ViewKind,
}

impl<V> ActiveView<V> {
    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn view_index(&self) -> usize {
        self.view_index
    }

    pub fn data_index(&self) -> usize {
        self.data_index
    }

    pub fn kind(&self) -> ViewKind {
        self.kind
    }
}

/// A view entering (`active`) or leaving the realized set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewTransition {
    pub view_index: usize,
    pub data_index: usize,
    pub kind: ViewKind,
    pub active: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub kept: usize,
    pub recycled: usize,
    pub reused: usize,
    pub created: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReconcileMode {
    /// Keep views already bound inside the new range.
    Incremental,
    /// Release every view first, then rebind the whole range.
    Rebind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Front,
    Back,
}

#[derive(Clone, Copy, Debug)]
struct Released {
    view_index: usize,
    data_index: usize,
    kind: ViewKind,
    side: Side,
}

#[derive(Debug)]
struct Staged<V> {
    entry: ActiveView<V>,
    pooled: bool,
}

/// The realized views of a list plus the pool they recycle through.
///
/// Active views are kept sorted by view index with no gaps, so a reconcile pass only
/// touches the two ends of the deque.
pub struct Recycler<V> {
    active: VecDeque<ActiveView<V>>,
    pool: RecyclePool<V>,

    // Scratch buffers reused across passes.
    released: Vec<Released>,
    front: Vec<Staged<V>>,
    back: Vec<Staged<V>>,
}

impl<V> Default for Recycler<V> {
    fn default() -> Self {
        Self {
            active: VecDeque::new(),
            pool: RecyclePool::default(),
            released: Vec::new(),
            front: Vec::new(),
            back: Vec::new(),
        }
    }
}

impl<V: core::fmt::Debug> core::fmt::Debug for Recycler<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Recycler")
            .field("active", &self.active)
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}

impl<V: ViewHandle> Recycler<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> &VecDeque<ActiveView<V>> {
        &self.active
    }

    pub fn active_mut(&mut self) -> impl Iterator<Item = &mut ActiveView<V>> {
        self.active.iter_mut()
    }

    pub fn pool(&self) -> &RecyclePool<V> {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut RecyclePool<V> {
        &mut self.pool
    }

    /// View index range currently realized.
    pub fn range(&self) -> Option<ItemRange> {
        let first = self.active.front()?;
        let last = self.active.back()?;
        Some(ItemRange::new(first.view_index, last.view_index))
    }

    pub fn find_data(&self, data_index: usize) -> Option<&ActiveView<V>> {
        self.active.iter().find(|e| e.data_index == data_index)
    }

    /// Makes the realized set match `range`.
    ///
    /// Views outside the range go to the pool. Missing slots are filled from the pool, or
    /// from `delegate.create_view` when the pool has no view of the right kind; each
    /// newly active view is bound through [`ViewHandle::set_data`].
    ///
    /// Transitions are appended to `transitions` only once the whole pass succeeded. On
    /// error every view is returned to where it was (views created during the failed pass
    /// end up in the pool) and no transition is reported.
    pub fn reconcile<D>(
        &mut self,
        range: Option<ItemRange>,
        data_count: usize,
        delegate: &mut D,
        mode: ReconcileMode,
        transitions: &mut Vec<ViewTransition>,
    ) -> Result<ReconcileStats, ScrollerError>
    where
        D: ScrollDelegate<View = V> + ?Sized,
    {
        let Some(range) = range.filter(|_| data_count > 0) else {
            let recycled = self.release_all(transitions);
            return Ok(ReconcileStats {
                recycled,
                ..ReconcileStats::default()
            });
        };

        self.released.clear();
        self.front.clear();
        self.back.clear();

        self.release_outside(range, mode);

        let survivors = self.range();
        let result = match survivors {
            None => self.stage_back(range.start, range.end, data_count, delegate),
            Some(kept) => {
                let below = if range.start < kept.start {
                    self.stage_front(range.start, kept.start - 1, data_count, delegate)
                } else {
                    Ok(())
                };
                below.and_then(|()| {
                    if kept.end < range.end {
                        self.stage_back(kept.end + 1, range.end, data_count, delegate)
                    } else {
                        Ok(())
                    }
                })
            }
        };

        if let Err(err) = result {
            rwarn!(
                start = range.start,
                end = range.end,
                "Recycler::reconcile failed; rolling back"
            );
            self.rollback();
            return Err(err);
        }

        Ok(self.commit(transitions))
    }

    fn release_outside(&mut self, range: ItemRange, mode: ReconcileMode) {
        let rebind = mode == ReconcileMode::Rebind;
        while let Some(front) = self.active.front() {
            if !rebind && front.view_index >= range.start {
                break;
            }
            if let Some(entry) = self.active.pop_front() {
                self.release(entry, Side::Front);
            }
        }
        while let Some(back) = self.active.back() {
            if back.view_index <= range.end {
                break;
            }
            if let Some(entry) = self.active.pop_back() {
                self.release(entry, Side::Back);
            }
        }
        // A kept run that fell entirely outside the range was drained from the front.
        debug_assert!(self.range().is_none_or(|kept| {
            kept.start >= range.start && kept.end <= range.end
        }));
    }

    fn release(&mut self, mut entry: ActiveView<V>, side: Side) {
        entry.view.will_recycle();
        self.released.push(Released {
            view_index: entry.view_index,
            data_index: entry.data_index,
            kind: entry.kind,
            side,
        });
        self.pool.put(entry.view);
    }

    // Descending, so that committing with `push_front` keeps the deque sorted.
    fn stage_front<D>(
        &mut self,
        start: usize,
        end: usize,
        data_count: usize,
        delegate: &mut D,
    ) -> Result<(), ScrollerError>
    where
        D: ScrollDelegate<View = V> + ?Sized,
    {
        self.front.reserve(end - start + 1);
        for view_index in (start..=end).rev() {
            let staged = obtain(&mut self.pool, delegate, view_index, data_count)?;
            self.front.push(staged);
        }
        Ok(())
    }

    fn stage_back<D>(
        &mut self,
        start: usize,
        end: usize,
        data_count: usize,
        delegate: &mut D,
    ) -> Result<(), ScrollerError>
    where
        D: ScrollDelegate<View = V> + ?Sized,
    {
        self.back.reserve(end - start + 1);
        for view_index in start..=end {
            let staged = obtain(&mut self.pool, delegate, view_index, data_count)?;
            self.back.push(staged);
        }
        Ok(())
    }

    fn commit(&mut self, transitions: &mut Vec<ViewTransition>) -> ReconcileStats {
        let mut stats = ReconcileStats {
            kept: self.active.len(),
            recycled: self.released.len(),
            ..ReconcileStats::default()
        };

        transitions.reserve(self.released.len() + self.front.len() + self.back.len());
        for r in self.released.drain(..) {
            transitions.push(ViewTransition {
                view_index: r.view_index,
                data_index: r.data_index,
                kind: r.kind,
                active: false,
            });
        }

        self.active.reserve(self.front.len() + self.back.len());
        for staged in self.front.drain(..).chain(self.back.drain(..)) {
            if staged.pooled {
                stats.reused += 1;
            } else {
                stats.created += 1;
            }
            let entry = staged.entry;
            transitions.push(ViewTransition {
                view_index: entry.view_index,
                data_index: entry.data_index,
                kind: entry.kind,
                active: true,
            });
            if self
                .active
                .front()
                .is_some_and(|first| entry.view_index < first.view_index)
            {
                self.active.push_front(entry);
            } else {
                self.active.push_back(entry);
            }
        }

        debug_assert!(
            self.active
                .iter()
                .zip(self.active.iter().skip(1))
                .all(|(a, b)| a.view_index + 1 == b.view_index),
            "active views must be contiguous"
        );
        stats
    }

    // Undo in reverse order so each pool bucket returns to its exact pre-pass contents.
    fn rollback(&mut self) {
        let mut fresh = Vec::new();
        while let Some(staged) = self.back.pop().or_else(|| self.front.pop()) {
            if staged.pooled {
                self.pool.put(staged.entry.view);
            } else {
                fresh.push(staged.entry.view);
            }
        }

        while let Some(r) = self.released.pop() {
            let Some(mut view) = self.pool.take(r.kind) else {
                debug_assert!(false, "released view missing from pool");
                continue;
            };
            view.set_data(r.data_index);
            let entry = ActiveView {
                view,
                view_index: r.view_index,
                data_index: r.data_index,
                kind: r.kind,
            };
            match r.side {
                Side::Front => self.active.push_front(entry),
                Side::Back => self.active.push_back(entry),
            }
        }

        for view in fresh {
            self.pool.put(view);
        }
    }

    /// Moves every active view into the pool. Returns how many were released.
    pub fn release_all(&mut self, transitions: &mut Vec<ViewTransition>) -> usize {
        let count = self.active.len();
        transitions.reserve(count);
        while let Some(mut entry) = self.active.pop_front() {
            entry.view.will_recycle();
            transitions.push(ViewTransition {
                view_index: entry.view_index,
                data_index: entry.data_index,
                kind: entry.kind,
                active: false,
            });
            self.pool.put(entry.view);
        }
        count
    }

    /// Calls [`ViewHandle::refresh`] on every active view.
    pub fn refresh_all(&mut self) {
        for entry in self.active.iter_mut() {
            entry.view.refresh();
        }
    }

    /// Removes every active view without pooling it.
    pub fn clear_active(&mut self) -> Vec<V> {
        self.active.drain(..).map(|e| e.view).collect()
    }
}

fn obtain<V, D>(
    pool: &mut RecyclePool<V>,
    delegate: &mut D,
    view_index: usize,
    data_count: usize,
) -> Result<Staged<V>, ScrollerError>
where
    V: ViewHandle,
    D: ScrollDelegate<View = V> + ?Sized,
{
    let data_index = view_index % data_count;
    let kind = delegate.view_kind(data_index);
    let (mut view, pooled) = match pool.take(kind) {
        Some(view) => (view, true),
        None => {
            let view = delegate
                .create_view(kind, data_index, view_index)
                .map_err(|source| ScrollerError::ViewFactory {
                    data_index,
                    view_index,
                    source,
                })?;
            if view.kind() != kind {
                return Err(ScrollerError::ViewKindMismatch {
                    data_index,
                    expected: kind,
                    found: view.kind(),
                });
            }
            (view, false)
        }
    };
    view.set_data(data_index);
    Ok(Staged {
        entry: ActiveView {
            view,
            view_index,
            data_index,
            kind,
        },
        pooled,
    })
}
