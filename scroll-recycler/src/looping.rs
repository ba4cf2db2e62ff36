use crate::GeometryTable;

/// Layout of an expanded looping list: three identical copies of the padded base list.
///
/// Positions are geometry-space offsets (edge padding excluded). Scrolling is kept inside
/// `[first_trigger, last_trigger]`; leaving that window shifts the position by exactly one
/// copy width, which lands on an identical-looking spot in a neighboring copy.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoopLayout {
    data_count: usize,
    copy_len: usize,
    copy_width: f32,
    spacing: f32,
    first_position: f32,
    last_position: f32,
    first_trigger: f32,
    last_trigger: f32,
}

impl LoopLayout {
    /// Expands `base` for looping in a viewport of `viewport_size`.
    ///
    /// The base list is repeated until one copy covers the viewport, then tripled.
    /// Returns `None` for an empty base list.
    pub fn expand(base: &GeometryTable, viewport_size: f32) -> Option<(GeometryTable, Self)> {
        let data_count = base.len();
        if data_count == 0 {
            return None;
        }

        let extent = base.total_extent();
        let spacing = base.spacing();
        let mut repeats = 1usize;
        if extent > 0.0 {
            let mut covered = extent;
            while covered < viewport_size {
                covered += spacing + extent;
                repeats += 1;
            }
        } else {
            rwarn!(data_count, "LoopLayout: base list has no extent; skipping padding");
        }

        let copy_len = data_count * repeats;
        let table = base.repeated(repeats * 3);
        let middle_start = copy_len;
        let middle_end = copy_len * 2 - 1;

        let half_gap = spacing * 0.5;
        let first_position = table.offset_before(middle_start) + half_gap;
        let last_position = table.offset_after(middle_end) - viewport_size + half_gap;
        let copy_width = table.offset_before(middle_end + 1) - table.offset_before(middle_start);

        rdebug!(
            data_count,
            repeats,
            copy_len,
            copy_width,
            "LoopLayout::expand"
        );

        let layout = Self {
            data_count,
            copy_len,
            copy_width,
            spacing,
            first_position,
            last_position,
            first_trigger: first_position - viewport_size,
            last_trigger: last_position + viewport_size,
        };
        Some((table, layout))
    }

    /// Number of distinct data items.
    pub fn data_count(&self) -> usize {
        self.data_count
    }

    /// Items in one copy (data count times the padding repeat factor).
    pub fn copy_len(&self) -> usize {
        self.copy_len
    }

    /// Distance between the same item in two neighboring copies.
    pub fn copy_width(&self) -> f32 {
        self.copy_width
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn middle_start(&self) -> usize {
        self.copy_len
    }

    pub fn middle_end(&self) -> usize {
        self.copy_len * 2 - 1
    }

    pub fn first_position(&self) -> f32 {
        self.first_position
    }

    pub fn last_position(&self) -> f32 {
        self.last_position
    }

    pub fn first_trigger(&self) -> f32 {
        self.first_trigger
    }

    pub fn last_trigger(&self) -> f32 {
        self.last_trigger
    }

    pub fn data_index(&self, view_index: usize) -> usize {
        view_index % self.data_count
    }

    /// View index of `data_index` inside the middle copy.
    pub fn middle_view_index(&self, data_index: usize) -> usize {
        self.copy_len + data_index.min(self.data_count - 1)
    }

    /// Returns the wrapped position if `position` left the trigger window.
    pub fn wrap(&self, position: f32) -> Option<f32> {
        if position < self.first_trigger {
            Some(position + self.copy_width)
        } else if position > self.last_trigger {
            Some(position - self.copy_width)
        } else {
            None
        }
    }

    /// Like [`Self::wrap`], but only checks the trigger in the direction of travel.
    pub fn wrap_directed(&self, position: f32, forward: bool) -> Option<f32> {
        if forward && position > self.last_trigger {
            Some(position - self.copy_width)
        } else if !forward && position < self.first_trigger {
            Some(position + self.copy_width)
        } else {
            None
        }
    }

    /// Folds a loop-space position back onto a single copy, in `[0, copy_width)`.
    pub fn unwrap_position(&self, position: f32) -> f32 {
        if self.copy_width <= 0.0 {
            return 0.0;
        }
        let mut local = position - self.first_position;
        while local < 0.0 {
            local += self.copy_width;
        }
        while local >= self.copy_width {
            local -= self.copy_width;
        }
        local
    }
}
