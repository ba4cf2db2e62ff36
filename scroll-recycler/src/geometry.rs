use alloc::vec::Vec;

use crate::ScrollerError;

/// Per-item sizes plus running end offsets, rebuilt wholesale from a size provider.
///
/// Offsets are measured from the first item (padding excluded). Spacing sits between
/// items only, and belongs to the item that follows it: a position inside the gap
/// before item `i` resolves to `i`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeometryTable {
    sizes: Vec<f32>,
    ends: Vec<f32>, // ends[i] = offset_after(i)
    spacing: f32,
}

impl GeometryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table by querying `size_of(i)` once for each `i in 0..count`, in order.
    ///
    /// Fails on a negative or non-finite size (or spacing); nothing is clamped.
    pub fn build(
        count: usize,
        mut size_of: impl FnMut(usize) -> f32,
        spacing: f32,
    ) -> Result<Self, ScrollerError> {
        check_spacing(spacing)?;
        let mut sizes = Vec::with_capacity(count);
        for index in 0..count {
            let size = size_of(index);
            check_size(index, size)?;
            sizes.push(size);
        }
        Ok(Self::from_checked(sizes, spacing))
    }

    /// Builds a table from precomputed sizes.
    pub fn from_sizes(sizes: Vec<f32>, spacing: f32) -> Result<Self, ScrollerError> {
        check_spacing(spacing)?;
        for (index, &size) in sizes.iter().enumerate() {
            check_size(index, size)?;
        }
        Ok(Self::from_checked(sizes, spacing))
    }

    /// Replaces the contents of this table; on error `self` is left untouched.
    pub fn rebuild(
        &mut self,
        count: usize,
        size_of: impl FnMut(usize) -> f32,
        spacing: f32,
    ) -> Result<(), ScrollerError> {
        *self = Self::build(count, size_of, spacing)?;
        Ok(())
    }

    fn from_checked(sizes: Vec<f32>, spacing: f32) -> Self {
        let mut ends = Vec::with_capacity(sizes.len());
        let mut end = 0.0f32;
        for (i, &size) in sizes.iter().enumerate() {
            let start = if i == 0 { 0.0 } else { end + spacing };
            end = start + size;
            ends.push(end);
        }
        Self {
            sizes,
            ends,
            spacing,
        }
    }

    /// Returns a table holding `copies` back-to-back copies of this one.
    pub(crate) fn repeated(&self, copies: usize) -> Self {
        let mut sizes = Vec::with_capacity(self.sizes.len().saturating_mul(copies));
        for _ in 0..copies {
            sizes.extend_from_slice(&self.sizes);
        }
        Self::from_checked(sizes, self.spacing)
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    /// Size of `index`, or `0.0` when out of range.
    pub fn size(&self, index: usize) -> f32 {
        self.sizes.get(index).copied().unwrap_or(0.0)
    }

    /// Start offset of `index`. Indexes past the end clamp to the last item.
    pub fn offset_before(&self, index: usize) -> f32 {
        let Some(last) = self.sizes.len().checked_sub(1) else {
            return 0.0;
        };
        let i = index.min(last);
        if i == 0 {
            0.0
        } else {
            self.ends[i - 1] + self.spacing
        }
    }

    /// End offset of `index`. Indexes past the end clamp to the last item.
    pub fn offset_after(&self, index: usize) -> f32 {
        let Some(last) = self.ends.len().checked_sub(1) else {
            return 0.0;
        };
        self.ends[index.min(last)]
    }

    /// Sum of all sizes and inner spacing.
    pub fn total_extent(&self) -> f32 {
        self.ends.last().copied().unwrap_or(0.0)
    }

    /// Returns the smallest index whose end offset lies strictly past `position`.
    ///
    /// `position <= 0` maps to `0`, positions at or past the total extent map to the last
    /// index. Zero-size items are skipped unless they are last. Runs in `O(log n)`.
    pub fn index_at_position(&self, position: f32) -> usize {
        let Some(last) = self.ends.len().checked_sub(1) else {
            return 0;
        };
        if position <= 0.0 {
            return 0;
        }
        self.ends.partition_point(|&end| end <= position).min(last)
    }
}

fn check_size(index: usize, size: f32) -> Result<(), ScrollerError> {
    if size.is_finite() && size >= 0.0 {
        return Ok(());
    }
    rwarn!(index, size, "GeometryTable: invalid item size");
    Err(ScrollerError::InvalidItemSize { index, size })
}

fn check_spacing(spacing: f32) -> Result<(), ScrollerError> {
    if spacing.is_finite() && spacing >= 0.0 {
        Ok(())
    } else {
        Err(ScrollerError::InvalidSpacing { spacing })
    }
}
