use alloc::vec::Vec;

use crate::key::KindMap;
use crate::{ViewHandle, ViewKind};

/// Inactive views waiting to be reused, bucketed by [`ViewKind`].
///
/// Each bucket is a stack: the most recently released view is handed out first.
pub struct RecyclePool<V> {
    buckets: KindMap<Vec<V>>,
    len: usize,
}

impl<V> Default for RecyclePool<V> {
    fn default() -> Self {
        Self {
            buckets: KindMap::default(),
            len: 0,
        }
    }
}

impl<V: core::fmt::Debug> core::fmt::Debug for RecyclePool<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RecyclePool")
            .field("len", &self.len)
            .field("buckets", &self.buckets)
            .finish()
    }
}

impl<V: ViewHandle> RecyclePool<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `view` under its own kind.
    pub fn put(&mut self, view: V) {
        self.buckets.entry(view.kind()).or_default().push(view);
        self.len += 1;
    }

    /// Takes the most recently pooled view of `kind`, if any.
    pub fn take(&mut self, kind: ViewKind) -> Option<V> {
        let view = self.buckets.get_mut(&kind)?.pop()?;
        self.len -= 1;
        Some(view)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn len_of(&self, kind: ViewKind) -> usize {
        self.buckets.get(&kind).map_or(0, Vec::len)
    }

    pub fn iter(&self) -> impl Iterator<Item = &V> {
        self.buckets.values().flat_map(|bucket| bucket.iter())
    }

    /// Removes every pooled view and hands ownership back to the caller.
    pub fn drain(&mut self) -> Vec<V> {
        let mut out = Vec::with_capacity(self.len);
        for bucket in self.buckets.values_mut() {
            out.append(bucket);
        }
        self.len = 0;
        out
    }
}
