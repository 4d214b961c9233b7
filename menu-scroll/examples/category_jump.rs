use menu_scroll::{FrameScheduler, LayoutMetrics, ScrollEngine, ScrollOptions, ScrollSurface};

// A stand-in for a real scroll container.
struct Viewport {
    offset: u64,
}

impl ScrollSurface<&'static str> for Viewport {
    fn scroll_to(&mut self, offset: u64) {
        self.offset = offset;
    }

    fn set_highlight(&mut self, key: &&'static str, on: bool) {
        println!("highlight {key} -> {on}");
    }
}

#[derive(Default)]
struct Loop {
    frame: bool,
}

impl FrameScheduler for Loop {
    fn request_frame(&mut self) {
        self.frame = true;
    }

    fn request_timeout(&mut self, delay_ms: u64) {
        println!("highlight expires in {delay_ms}ms");
    }
}

fn main() {
    // Example: a menu page whose sections mount, get measured, and are jumped to.
    //
    // An adapter would:
    // - call mount() when the page mounts and relayout() once sections have rendered
    // - call select() (or select_and_schedule()) when a category button is clicked
    // - call pump(now_ms) from its frame callback until no further frame is requested
    let mut engine = ScrollEngine::new(ScrollOptions::default());
    let mut viewport = Viewport { offset: 0 };
    let mut frames = Loop::default();

    engine.mount();
    println!("before layout: {:?}", engine.select("Whiskey", 0));

    let extent = engine.relayout(
        LayoutMetrics::new(4_000, 900),
        [("Gin", 200), ("Rum", 900), ("Whiskey", 1_800), ("Tequila", 2_600)],
    );
    println!("extent={extent}");

    let mut now_ms = 0u64;
    let target = engine.select_and_schedule("Whiskey", now_ms, &mut frames);
    println!("target={target:?}");

    while std::mem::take(&mut frames.frame) {
        now_ms += 16;
        engine.pump(now_ms, &mut viewport, &mut frames);
        engine.on_scroll(viewport.offset);

        // The user changes their mind mid-flight: the animation restarts from here.
        if now_ms == 160 {
            engine.select_and_schedule("Rum", now_ms, &mut frames);
        }
        if now_ms % 80 == 0 {
            println!("t={now_ms} off={} phase={:?}", viewport.offset, engine.phase());
        }
    }

    println!("done: off={} phase={:?}", viewport.offset, engine.phase());
}
