use crate::{GeometryTable, ItemRange};

/// Resolves the inclusive range of item indexes intersecting the viewport.
///
/// `scroll_position` is measured from the content start, so `leading` (the leading edge
/// padding) is subtracted before lookup. Returns `None` only for an empty table; a zero
/// viewport still yields the single item under `scroll_position`.
pub fn resolve(
    table: &GeometryTable,
    scroll_position: f32,
    viewport_size: f32,
    leading: f32,
) -> Option<ItemRange> {
    if table.is_empty() {
        return None;
    }
    let top = scroll_position - leading;
    let start = table.index_at_position(top);
    let end = table.index_at_position(top + viewport_size.max(0.0));
    Some(ItemRange::new(start, end.max(start)))
}
