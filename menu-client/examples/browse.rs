use menu_client::menu_catalog::{DisplayPolicy, format_abv};
use menu_client::{CatalogClient, FallbackPolicy, MenuPage};
use menu_scroll::{FrameScheduler, LayoutMetrics, ScrollEngine, ScrollOptions, ScrollSurface};
use tracing_subscriber::EnvFilter;

const SECTION_HEADER: u64 = 48;
const ROW_HEIGHT: u64 = 64;
const VIEWPORT: u64 = 720;

struct Terminal {
    offset: u64,
}

impl ScrollSurface<String> for Terminal {
    fn scroll_to(&mut self, offset: u64) {
        self.offset = offset;
    }

    fn set_highlight(&mut self, key: &String, on: bool) {
        println!("  [{}] {key}", if on { "*" } else { " " });
    }
}

#[derive(Default)]
struct Frames {
    frame: bool,
    timeout: Option<u64>,
}

impl FrameScheduler for Frames {
    fn request_frame(&mut self) {
        self.frame = true;
    }

    fn request_timeout(&mut self, delay_ms: u64) {
        self.timeout = Some(delay_ms);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=menu_client=debug,menu_catalog=trace cargo run -p menu-client --example browse
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = CatalogClient::from_env()?;
    let page = MenuPage::load(&client, FallbackPolicy::BuiltIn).await?;
    if page.is_fallback() {
        println!("(backend unavailable, showing the house menu)");
    }

    let catalog = page.catalog();
    let policy = DisplayPolicy::FirstIngredientForLiquor;
    let mut sections = Vec::new();
    let mut top = 0u64;
    for category in catalog.categories() {
        sections.push((category.label.clone(), top));
        println!("== {} ({})", category.label, category.len());
        for drink in catalog.members(category) {
            println!(
                "   {:<24} {:>6}  {}",
                drink.display_name(),
                format_abv(drink.abv),
                policy.base_label(drink)
            );
        }
        top += SECTION_HEADER + ROW_HEIGHT * category.len() as u64;
    }

    let Some(last) = sections.last().map(|(label, _)| label.clone()) else {
        println!("the menu is empty");
        return Ok(());
    };

    let mut engine = ScrollEngine::new(ScrollOptions::default());
    let mut terminal = Terminal { offset: 0 };
    let mut frames = Frames::default();
    engine.mount();
    engine.relayout(LayoutMetrics::new(top, VIEWPORT), sections);

    let mut now_ms = 0u64;
    if let Some(target) = engine.select_and_schedule(last.clone(), now_ms, &mut frames) {
        println!("jumping to {last} at {target}px");
    }
    while std::mem::take(&mut frames.frame) {
        now_ms += 16;
        engine.pump(now_ms, &mut terminal, &mut frames);
        engine.on_scroll(terminal.offset);
    }
    if let Some(delay) = frames.timeout.take() {
        engine.pump(now_ms + delay, &mut terminal, &mut frames);
    }
    println!("settled at {}px after {now_ms}ms", terminal.offset);
    Ok(())
}
