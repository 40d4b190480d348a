use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

#[test]
fn defaults_match_documented_values() {
    let config = TourConfig::default();
    assert!(config.auto_scroll);
    assert!(!config.key_events);
    assert!(config.overlay);
    assert!(!config.click_overlay_closes_tour);
    assert_eq!(config.prefix(), "tour");
    assert_eq!(config.class("slide"), "tour-slide");
}

#[test]
fn blank_prefix_falls_back_to_default() {
    let mut config = TourConfig::new("flow.json");
    config.css_prefix = Some("  ".into());
    assert_eq!(config.prefix(), DEFAULT_CSS_PREFIX);

    config.css_prefix = Some("intro".into());
    assert_eq!(config.class("overlay"), "intro-overlay");
}

#[test]
fn parses_camel_case_toml() {
    let config: TourConfig = toml::from_str(
        r#"
        flowUrl = "https://example.com/flow.json"
        keyEvents = true
        cssPrefix = "guide"
        clickOverlayClosesTour = true

        [buttonHtml]
        next = "Next &rarr;"
        "#,
    )
    .expect("toml");

    assert_eq!(config.flow_url, "https://example.com/flow.json");
    assert!(config.key_events);
    assert!(config.auto_scroll);
    assert!(config.click_overlay_closes_tour);
    assert_eq!(config.button_html.next, "Next &rarr;");
    assert_eq!(config.button_html.exit, "Exit");
}

#[test]
fn env_overrides_take_precedence() {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("TOUR_FLOW_URL", "file:///tmp/flow.json"),
        ("TOUR_AUTO_SCROLL", "off"),
        ("TOUR_KEY_EVENTS", "1"),
    ]);
    let mut config = TourConfig::new("ignored.json");
    apply_env_overrides(&mut config, |var| vars.get(var).map(|v| v.to_string()))
        .expect("overrides");

    assert_eq!(config.flow_url, "file:///tmp/flow.json");
    assert!(!config.auto_scroll);
    assert!(config.key_events);
}

#[test]
fn rejects_invalid_boolean_override() {
    let mut config = TourConfig::default();
    let err = apply_env_overrides(&mut config, |var| {
        (var == "TOUR_OVERLAY").then(|| "maybe".to_string())
    })
    .expect_err("must fail");
    assert!(matches!(err, ConfigError::InvalidBool { .. }));
}

#[test]
fn validation_requires_flow_url() {
    assert!(matches!(
        TourConfig::default().validate(),
        Err(ConfigError::MissingFlowUrl)
    ));
    assert!(TourConfig::new("flow.json").validate().is_ok());
}

#[test]
fn reads_config_file_from_disk() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("tour_core_config_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("tour.toml");
    fs::write(&path, "flowUrl = \"flow.json\"\noverlay = false\n").expect("write");

    let config = parse_config_file(&path).expect("config");
    assert_eq!(config.flow_url, "flow.json");
    assert!(!config.overlay);

    fs::remove_dir_all(temp_root).expect("cleanup");
}

#[test]
fn explicit_flow_url_satisfies_validation() {
    let config = load_config_with_flow(None, Some("cli-flow.json")).expect("config");
    assert_eq!(config.flow_url, "cli-flow.json");
}
