use super::*;

#[test]
fn parses_flow_file_with_camel_case_fields() {
    let raw = r##"[
        {"title": "Welcome", "body": "Start here", "style": "modal"},
        {
            "title": "Search",
            "body": "Type a query",
            "style": "float",
            "target": "#search",
            "extraClasses": ["wide", "dark"],
            "onShow": "focus-search",
            "onEnd": "blur-search"
        }
    ]"##;

    let flow = Flow::from_json(raw).expect("flow");
    assert_eq!(flow.len(), 2);
    assert_eq!(flow.slides()[0].style, SlideStyle::Modal);

    let search = flow.get(1).expect("second slide");
    assert_eq!(search.style, SlideStyle::Float);
    assert_eq!(search.float_target(), Some("#search"));
    assert_eq!(search.extra_classes, vec!["wide", "dark"]);
    assert_eq!(search.on_show, Some(HookName::new("focus-search")));
    assert_eq!(search.on_end, Some(HookName::new("blur-search")));
}

#[test]
fn style_defaults_to_modal() {
    let flow = Flow::from_json(r#"[{"title": "t", "body": "b"}]"#).expect("flow");
    assert_eq!(flow.slides()[0].style, SlideStyle::Modal);
}

#[test]
fn rejects_unknown_style() {
    assert!(Flow::from_json(r#"[{"title": "t", "body": "b", "style": "popup"}]"#).is_err());
}

#[test]
fn video_media_defaults() {
    let flow = Flow::from_json(
        r#"[{"title": "t", "body": "b", "media": {"type": "video", "url": "intro.mp4"}}]"#,
    )
    .expect("flow");
    let media = flow.slides()[0].media.as_ref().expect("media");

    assert_eq!(media.media_kind(), Some(MediaKind::Video));
    assert!(media.muted);
    assert!(media.looped);
    assert!(media.autoplay);
    assert!(!media.controls);
}

#[test]
fn unknown_media_type_survives_parsing() {
    let flow = Flow::from_json(
        r#"[{"title": "t", "body": "b", "media": {"type": "audio", "url": "a.ogg"}}]"#,
    )
    .expect("flow");
    let media = flow.slides()[0].media.as_ref().expect("media");
    assert_eq!(media.kind.as_deref(), Some("audio"));
    assert_eq!(media.media_kind(), None);
}

#[test]
fn blank_target_is_treated_as_missing() {
    let slide = Slide::new("t", "b").floating("   ");
    assert_eq!(slide.float_target(), None);
}

#[test]
fn serializes_loop_field_under_its_flow_name() {
    let media = Media::new(MediaKind::Video, "clip.webm");
    let value = serde_json::to_value(&media).expect("json");
    assert_eq!(value["loop"], true);
    assert_eq!(value["type"], "video");
}
