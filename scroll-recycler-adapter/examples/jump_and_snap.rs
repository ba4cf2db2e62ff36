use std::time::Duration;

use scroll_recycler::{
    BoxError, ScrollDelegate, ScrollerError, ScrollerEvent, ScrollerOptions, ViewHandle, ViewKind,
};
use scroll_recycler_adapter::{Controller, Easing, JumpRequest, SnapOptions};

struct Row;

impl ViewHandle for Row {
    fn kind(&self) -> ViewKind {
        ViewKind::DEFAULT
    }

    fn set_data(&mut self, _data_index: usize) {}
}

struct Rows;

impl ScrollDelegate for Rows {
    type View = Row;

    fn item_count(&self) -> usize {
        10_000
    }

    fn item_size(&self, _data_index: usize) -> f32 {
        32.0
    }

    fn create_view(
        &mut self,
        _kind: ViewKind,
        _data_index: usize,
        _view_index: usize,
    ) -> Result<Row, BoxError> {
        Ok(Row)
    }
}

fn main() -> Result<(), ScrollerError> {
    // Example: a controller driving tweened jumps and snapping without holding any UI objects.
    //
    // An adapter would:
    // - forward viewport changes and user scrolls (with velocity)
    // - call tick(dt) in a frame loop / timer
    // - apply the returned position to the real scroll container (if any)
    let options = ScrollerOptions::new().with_on_event(Some(|e: &ScrollerEvent| match e {
        ScrollerEvent::Snapped { data_index, .. } => println!("snapped to {data_index}"),
        ScrollerEvent::TweeningChanged(on) => println!("tweening={on}"),
        _ => {}
    }));
    let snap = SnapOptions::new().with_enabled(true);
    let mut c = Controller::with_delegate(options, snap, Rows);
    c.on_viewport_size(320.0)?;
    c.tick(Duration::ZERO)?;

    let request = JumpRequest::new()
        .with_viewport_offset(0.5)
        .with_item_offset(0.5)
        .with_tween(Easing::EaseInOutCubic, Duration::from_millis(240));
    let target = c.jump_to_index_then(2_000, &request, || println!("jump complete"))?;
    println!("target={target}");

    let frame = Duration::from_millis(16);
    let mut frames = 0u32;
    while let Some(position) = c.tick(frame)? {
        frames += 1;
        if frames % 5 == 0 {
            println!(
                "frame={frames} position={position} visible={:?}",
                c.scroller().visible_range()
            );
        }
    }

    // A slow drag release lands between rows; the snap centers the nearest one.
    let position = c.scroller().scroll_position() + 13.0;
    c.on_scroll(position, 40.0)?;
    while c.tick(frame)?.is_some() {}
    println!(
        "done: position={} start={:?}",
        c.scroller().scroll_position(),
        c.scroller().start_data_index()
    );
    Ok(())
}
