// Example: a headless list of one million rows, scrolled and reused.
use scroll_recycler::{
    BoxError, ScrollDelegate, Scroller, ScrollerError, ScrollerEvent, ScrollerOptions, ViewHandle,
    ViewKind,
};

struct Label {
    text: String,
}

impl ViewHandle for Label {
    fn kind(&self) -> ViewKind {
        ViewKind::DEFAULT
    }

    fn set_data(&mut self, data_index: usize) {
        self.text = format!("row #{data_index}");
    }
}

struct Rows {
    created: usize,
}

impl ScrollDelegate for Rows {
    type View = Label;

    fn item_count(&self) -> usize {
        1_000_000
    }

    fn item_size(&self, data_index: usize) -> f32 {
        if data_index % 10 == 0 { 48.0 } else { 24.0 }
    }

    fn create_view(
        &mut self,
        _kind: ViewKind,
        _data_index: usize,
        _view_index: usize,
    ) -> Result<Label, BoxError> {
        self.created += 1;
        Ok(Label {
            text: String::new(),
        })
    }
}

fn main() -> Result<(), ScrollerError> {
    let options = ScrollerOptions::new()
        .with_spacing(2.0)
        .with_on_event(Some(|e: &ScrollerEvent| {
            if let ScrollerEvent::ViewWillRecycle(t) = e {
                println!("recycle view={} data={}", t.view_index, t.data_index);
            }
        }));
    let mut s = Scroller::with_delegate(options, Rows { created: 0 });
    s.set_viewport_size(120.0)?;
    s.tick()?;

    println!("content_extent={}", s.content_extent());
    println!("visible={:?}", s.visible_range());

    for position in [30.0, 60.0, 2_000.0, 1.0e9] {
        let update = s.on_scroll(position, 0.0)?;
        println!(
            "scroll={} visible={:?} pool={}",
            update.position,
            s.visible_range(),
            s.pool().len()
        );
    }

    for entry in s.active_views() {
        println!("{} -> {}", entry.view_index(), entry.view().text);
    }
    let created = s.delegate().map(|d| d.created).unwrap_or_default();
    println!("views created={created} active={}", s.active_len());
    Ok(())
}
