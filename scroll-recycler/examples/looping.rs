// Example: a short looping carousel. The host mirrors wrapped positions back into its
// scroll container.
use scroll_recycler::{
    BoxError, ScrollAxis, ScrollDelegate, Scroller, ScrollerError, ScrollerOptions, ViewHandle,
    ViewKind,
};

struct Card(usize);

impl ViewHandle for Card {
    fn kind(&self) -> ViewKind {
        ViewKind::DEFAULT
    }

    fn set_data(&mut self, data_index: usize) {
        self.0 = data_index;
    }
}

struct Cards;

impl ScrollDelegate for Cards {
    type View = Card;

    fn item_count(&self) -> usize {
        4
    }

    fn item_size(&self, _data_index: usize) -> f32 {
        80.0
    }

    fn create_view(
        &mut self,
        _kind: ViewKind,
        data_index: usize,
        _view_index: usize,
    ) -> Result<Card, BoxError> {
        Ok(Card(data_index))
    }
}

fn main() -> Result<(), ScrollerError> {
    let options = ScrollerOptions::new()
        .with_axis(ScrollAxis::Horizontal)
        .with_spacing(10.0)
        .with_looping(true);
    let mut s = Scroller::with_delegate(options, Cards);
    s.set_viewport_size(200.0)?;
    s.tick()?;

    if let Some(layout) = s.loop_layout() {
        println!(
            "copy_len={} copy_width={} triggers={}..{}",
            layout.copy_len(),
            layout.copy_width(),
            layout.first_trigger(),
            layout.last_trigger()
        );
    }

    // Simulate a fling to the right: the host keeps adding to the offset it last applied.
    let mut host = s.scroll_position();
    for _ in 0..40 {
        let update = s.on_scroll(host + 45.0, 900.0)?;
        if update.wrapped {
            println!("wrapped to {}", update.position);
        }
        host = update.position;
    }

    let bound: Vec<usize> = s.active_views().map(|e| e.view().0).collect();
    println!("position={} data={bound:?}", s.scroll_position());

    s.toggle_loop()?;
    println!("loop off: position={} range={:?}", s.scroll_position(), s.visible_range());
    Ok(())
}
