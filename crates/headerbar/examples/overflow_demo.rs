//! Walk a header through inline presses and both overflow surfaces.
//!
//! Run with:
//! `RUST_LOG=headerbar=trace cargo run -p headerbar --example overflow_demo --features tracing`

use std::cell::RefCell;
use std::rc::Rc;

use headerbar::prelude::*;
use headerbar::{MenuView, OVERFLOW_BUTTON_TEST_ID};
use tracing_subscriber::EnvFilter;

type Log = Rc<RefCell<Vec<String>>>;

fn items(log: &Log) -> Vec<Option<Item>> {
    let press = |name: &'static str| {
        let log = Rc::clone(log);
        move || log.borrow_mut().push(name.to_owned())
    };
    let signed_in = true;
    vec![
        Some(Item::new("Search").icon("search").on_press(press("search"))),
        Some(Item::new("Share").show(Visibility::Never).on_press(press("share"))),
        signed_in.then(|| Item::new("Report").show(Visibility::Never).on_press(press("report"))),
        Some(Item::new("Help").show(Visibility::Never)),
    ]
}

fn describe(view: &MenuView<'_>) {
    let labels: Vec<&str> = view.rows.iter().map(|r| r.label.as_str()).collect();
    tracing::info!(
        kind = ?view.kind,
        area = ?view.area,
        rows = ?labels,
        cancel = view.cancel.map(|c| c.label.as_str()),
        "menu open"
    );
}

fn run(platform: Platform, log: &Log) {
    let viewport = Rect::new(0, 0, 48, 16);
    let mut header = HeaderButtons::new(HeaderButtonsConfig::default().platform(platform))
        .with_items(items(log));
    header.set_viewport(viewport);
    let row = header.render(Rect::new(0, 0, 48, 1));
    let trigger = row.trigger.as_ref().map(|t| t.area);
    tracing::info!(
        platform = %platform,
        inline = row.buttons.len(),
        trigger = ?trigger,
        test_id = OVERFLOW_BUTTON_TEST_ID,
        "rendered"
    );

    // Tap the inline search button.
    if let Some(search) = header.row().buttons.first().map(|b| b.area) {
        let action = header.handle_event(&Event::tap(search.x, search.y));
        tracing::info!(?action, "tapped inline");
    }

    // Open the menu and pick "Report" with the keyboard.
    if let Some(area) = trigger {
        let action = header.handle_event(&Event::tap(area.x, area.y));
        tracing::info!(?action, "tapped trigger");
    }
    if let Some(view) = header.menu_view() {
        describe(&view);
    }
    header.handle_event(&Event::key(KeyCode::Char('r')));
    let action = header.handle_event(&Event::key(KeyCode::Enter));
    tracing::info!(?action, "selected");

    // Open again and back out.
    header.press_overflow_trigger();
    let action = header.handle_event(&Event::Back);
    tracing::info!(?action, stats = ?header.dispatch_stats(), "dismissed");
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let log = Log::default();
    run(Platform::Ios, &log);
    run(Platform::Android, &log);

    // Override: the caller presents its own menu.
    let mut header = HeaderButtons::new(HeaderButtonsConfig::default().on_overflow_menu_press(
        |params: headerbar::OverflowMenuPressParams<'_>| {
            let titles: Vec<&str> = params.hidden_buttons.iter().map(|b| b.title()).collect();
            tracing::info!(
                hidden = ?titles,
                anchor = ?params.overflow_button_ref.area,
                "custom overflow handler"
            );
        },
    ))
    .with_items(items(&log));
    header.render(Rect::new(0, 0, 48, 1));
    header.press_overflow_trigger();

    println!("handlers called: {:?}", log.borrow());
}
