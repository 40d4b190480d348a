use super::*;

use shared::SlideStyle;

fn config() -> TourConfig {
    TourConfig::new("flow.json")
}

fn buttons(view: &ViewNode) -> Vec<String> {
    view.find_by_class("tour-buttons")
        .expect("button row")
        .children
        .iter()
        .map(|b| b.classes[1].clone())
        .collect()
}

#[test]
fn wraps_overlay_and_slide() {
    let view = render_slide(&Slide::new("Hello", "World"), 0, 3, &config());

    assert!(view.has_class("tour-wrapper"));
    assert_eq!(view.children.len(), 2);
    assert!(view.children[0].has_class("tour-overlay"));
    assert_eq!(view.children[0].on_click, None);

    let slide = view.find_by_key(SLIDE_KEY).expect("slide");
    assert!(slide.has_class("tour-slide"));
    assert!(slide.has_class("tour-slide-modal"));
    assert_eq!(slide.attribute("data-slide"), Some(Some("1")));
}

#[test]
fn overlay_can_be_disabled_or_close_the_tour() {
    let mut config = config();
    config.overlay = false;
    let view = render_slide(&Slide::new("t", "b"), 0, 1, &config);
    assert!(view.find_by_class("tour-overlay").is_none());

    config.overlay = true;
    config.click_overlay_closes_tour = true;
    let view = render_slide(&Slide::new("t", "b"), 0, 1, &config);
    assert_eq!(
        view.find_by_class("tour-overlay").expect("overlay").on_click,
        Some(TourAction::Stop)
    );
}

#[test]
fn button_row_depends_on_position() {
    let slide = Slide::new("t", "b");
    assert_eq!(
        buttons(&render_slide(&slide, 0, 3, &config())),
        vec!["tour-button-exit", "tour-button-next"]
    );
    assert_eq!(
        buttons(&render_slide(&slide, 1, 3, &config())),
        vec!["tour-button-exit", "tour-button-prev", "tour-button-next"]
    );
    assert_eq!(
        buttons(&render_slide(&slide, 2, 3, &config())),
        vec!["tour-button-exit", "tour-button-prev"]
    );
    assert_eq!(
        buttons(&render_slide(&slide, 0, 1, &config())),
        vec!["tour-button-exit"]
    );
}

#[test]
fn text_is_escaped_and_button_html_is_not() {
    let mut config = config();
    config.button_html.exit = "<i>&times;</i>".into();
    let html = render_slide(&Slide::new("<Tips>", "a & b"), 0, 1, &config).to_html();

    assert!(html.contains("&lt;Tips&gt;"));
    assert!(html.contains("a &amp; b"));
    assert!(html.contains("<i>&times;</i>"));
}

#[test]
fn extra_classes_follow_declaration_order() {
    let slide = Slide::new("t", "b")
        .with_style(SlideStyle::Sidebar)
        .with_class("wide")
        .with_class("dark");
    let view = render_slide(&slide, 0, 1, &config());
    let node = view.find_by_key(SLIDE_KEY).expect("slide");

    assert_eq!(
        node.classes,
        vec!["tour-slide", "tour-slide-sidebar", "wide", "dark"]
    );
}

#[test]
fn repeated_extra_classes_keep_first_position() {
    let slide = Slide::new("t", "b")
        .with_class("dark")
        .with_class("")
        .with_class("wide")
        .with_class("dark")
        .with_class("tour-slide");
    let view = render_slide(&slide, 0, 1, &config());
    let node = view.find_by_key(SLIDE_KEY).expect("slide");

    assert_eq!(
        node.classes,
        vec!["tour-slide", "tour-slide-modal", "dark", "wide"]
    );
}

#[test]
fn video_defaults_are_muted_looped_autoplay_without_controls() {
    let flow = shared::Flow::from_json(
        r#"[{"title": "t", "body": "b", "media": {"type": "video", "url": "intro.mp4"}}]"#,
    )
    .expect("flow");
    let view = render_slide(&flow.slides()[0], 0, 1, &config());
    let video = view.find_by_class("tour-media-element").expect("video");

    assert_eq!(video.tag, "video");
    assert_eq!(video.attribute("src"), Some(Some("intro.mp4")));
    assert_eq!(video.attribute("muted"), Some(None));
    assert_eq!(video.attribute("loop"), Some(None));
    assert_eq!(video.attribute("autoplay"), Some(None));
    assert_eq!(video.attribute("controls"), None);
}

#[test]
fn image_media_gets_source_and_alt() {
    let slide = Slide::new("Dashboard", "b").with_media(Media::new(MediaKind::Image, "dash.png"));
    let view = render_slide(&slide, 0, 1, &config());
    let image = view.find_by_class("tour-media-element").expect("img");

    assert_eq!(image.tag, "img");
    assert_eq!(image.attribute("src"), Some(Some("dash.png")));
    assert_eq!(image.attribute("alt"), Some(Some("Dashboard")));
}

#[test]
fn unknown_media_type_is_omitted() {
    let mut media = Media::new(MediaKind::Image, "a.ogg");
    media.kind = Some("audio".into());
    let view = render_slide(&Slide::new("t", "b").with_media(media), 0, 1, &config());
    assert!(view.find_by_class("tour-media").is_none());

    let mut media = Media::new(MediaKind::Image, "a.png");
    media.kind = None;
    let view = render_slide(&Slide::new("t", "b").with_media(media), 0, 1, &config());
    assert!(view.find_by_class("tour-media").is_none());
}

#[test]
fn missing_media_url_keeps_element_without_source() {
    let mut media = Media::new(MediaKind::Video, "");
    media.url = None;
    let view = render_slide(&Slide::new("t", "b").with_media(media), 0, 1, &config());
    let video = view.find_by_class("tour-media-element").expect("video");
    assert_eq!(video.attribute("src"), None);
}

#[test]
fn css_prefix_applies_to_every_class() {
    let mut config = config();
    config.css_prefix = Some("guide".into());
    let view = render_slide(&Slide::new("t", "b"), 0, 2, &config);

    assert!(view.has_class("guide-wrapper"));
    assert!(view.find_by_class("guide-button-next").is_some());
    assert!(view.find_by_class("tour-slide").is_none());
}
