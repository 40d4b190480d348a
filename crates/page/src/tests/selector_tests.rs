use super::*;

#[test]
fn parses_compound_selector() {
    let selector = Selector::parse("button#save.primary.large[data-role=\"submit\"]").expect("parse");
    assert_eq!(selector.chain.len(), 1);

    let subject = selector.subject().unwrap();
    assert_eq!(subject.tag.as_deref(), Some("button"));
    assert_eq!(subject.id.as_deref(), Some("save"));
    assert_eq!(subject.classes, vec!["primary", "large"]);
    assert_eq!(
        subject.attributes,
        vec![AttributeMatch {
            name: "data-role".into(),
            value: Some("submit".into()),
        }]
    );
}

#[test]
fn quoted_attribute_values_may_contain_spaces() {
    let selector = Selector::parse("[data-tour-target='search box']").expect("parse");
    assert_eq!(selector.chain.len(), 1);
    assert_eq!(
        selector.subject().unwrap().attributes[0].value.as_deref(),
        Some("search box")
    );
}

#[test]
fn escaped_quotes_stay_inside_attribute_values() {
    let selector = Selector::parse(r#"[data-tour-target="it's \"x\" \\ y"]"#).expect("parse");
    assert_eq!(selector.chain.len(), 1);
    assert_eq!(
        selector.subject().unwrap().attributes[0].value.as_deref(),
        Some(r#"it's "x" \ y"#)
    );
    assert!(matches!(
        Selector::parse(r#"[data-x="open\"]"#),
        Err(PageError::InvalidSelector { .. })
    ));
}

#[test]
fn splits_descendant_chain() {
    let selector = Selector::parse("nav  .menu  a[href]").expect("parse");
    assert_eq!(selector.chain.len(), 3);
    assert_eq!(selector.chain[0].tag.as_deref(), Some("nav"));
    assert_eq!(selector.chain[1].classes, vec!["menu"]);
    assert_eq!(selector.chain[2].attributes[0].value, None);
}

#[test]
fn rejects_combinators_and_pseudo_classes() {
    assert!(matches!(
        Selector::parse("ul > li"),
        Err(PageError::UnsupportedSelector(_))
    ));
    assert!(matches!(
        Selector::parse("a:hover"),
        Err(PageError::UnsupportedSelector(_))
    ));
}

#[test]
fn rejects_malformed_selectors() {
    assert!(matches!(Selector::parse(""), Err(PageError::InvalidSelector { .. })));
    assert!(matches!(Selector::parse("#"), Err(PageError::InvalidSelector { .. })));
    assert!(matches!(
        Selector::parse("[data-x=\"open"),
        Err(PageError::InvalidSelector { .. })
    ));
}
