use std::{sync::Arc, time::Duration};

use axum::{routing::get, Router};
use page::{ListenerKind, MemoryPage, Page, Rect, Viewport};
use shared::{Key, TourAction};
use tokio::{net::TcpListener, runtime::Runtime};
use tour_core::{HttpFlowLoader, TourConfig, TourController, TourEvent, TourHost, SLIDE_KEY};

const FLOW_JSON: &str = r##"[
    {"title": "Welcome", "body": "Let's look around", "media": {"type": "video", "url": "/intro.mp4"}},
    {"title": "Search", "body": "Find anything", "style": "float", "target": "search-box"},
    {"title": "Settings", "body": "Tune it", "style": "float", "target": ".settings"},
    {"title": "Done", "body": "Enjoy", "style": "sidebar", "extraClasses": ["final"]}
]"##;

fn spawn_flow_server(runtime: &Runtime) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = runtime
        .block_on(TcpListener::bind("127.0.0.1:0"))
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new().route("/flow.json", get(|| async { FLOW_JSON }));
    runtime.spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}/flow.json")
}

fn app_page() -> MemoryPage {
    let mut page = MemoryPage::new(Viewport::new(1000.0, 600.0));
    let header = page.append_element(page.body(), "header");
    let search = page.append_element(header, "input");
    page.set_attribute(search, "data-tour-target", "search-box");
    page.set_layout(search, Rect::new(40.0, 10.0, 200.0, 30.0));
    let settings = page.append_element(header, "button");
    page.set_attribute(settings, "class", "settings icon");
    page.set_layout(settings, Rect::new(900.0, 1200.0, 40.0, 40.0));
    page
}

#[test]
fn walks_a_fetched_flow_end_to_end() {
    let runtime = Runtime::new().expect("runtime");
    let flow_url = spawn_flow_server(&runtime);
    let mut config = TourConfig::new(flow_url);
    config.key_events = true;

    let mut host = TourHost::new(
        TourController::new(config),
        app_page(),
        Arc::new(HttpFlowLoader::new()),
        runtime.handle().clone(),
    );
    host.load(|controller, page, outcome| {
        assert_eq!(outcome, Ok(4));
        controller.start(page).expect("start");
    });
    assert!(host.pump_until_loaded(Duration::from_secs(10)));

    let video = host.page().elements_with_class("tour-media-element");
    assert_eq!(video.len(), 1);
    assert_eq!(host.page().tag(video[0]), Some("video"));

    let events = host.sender();
    events.send(TourEvent::Key(Key::ArrowRight)).expect("send");
    host.pump();
    let search = host
        .page()
        .query_selector("[data-tour-target=\"search-box\"]")
        .expect("query")
        .expect("search box");
    assert!(host.page().has_class(search, "tour-highlight"));
    let slide = host
        .controller()
        .mounted()
        .and_then(|m| m.element(SLIDE_KEY))
        .expect("slide");
    assert_eq!(host.page().style(slide, "left").as_deref(), Some("40px"));
    assert_eq!(host.page().style(slide, "top").as_deref(), Some("40px"));

    events.send(TourEvent::Action(TourAction::Next)).expect("send");
    host.pump();
    let settings = host
        .page()
        .query_selector(".settings")
        .expect("query")
        .expect("settings");
    assert!(!host.page().has_class(search, "tour-highlight"));
    assert!(host.page().has_class(settings, "tour-highlight"));
    let slide = host
        .controller()
        .mounted()
        .and_then(|m| m.element(SLIDE_KEY))
        .expect("slide");
    assert!(host.page().has_class(slide, "tour-right-aligned"));
    assert_eq!(host.page().style(slide, "right").as_deref(), Some("60px"));
    assert_eq!(host.page().scroll_metrics().y(), 940.0);

    events.send(TourEvent::Key(Key::ArrowRight)).expect("send");
    events.send(TourEvent::Key(Key::ArrowRight)).expect("send");
    host.pump();
    assert!(!host.controller().is_active());
    assert!(host.page().elements_with_class("tour-highlight").is_empty());
    assert_eq!(host.page().listener_count(ListenerKind::KeyDown), 0);

    let page = host.shutdown();
    assert_eq!(page.listener_count(ListenerKind::Resize), 0);
}
