use std::collections::BTreeMap;

use serde::Serialize;
use shared::TourAction;

use crate::ElementId;

const VOID_ELEMENTS: &[&str] = &["img", "br", "hr", "input", "source"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Content {
    /// Escaped when serialised.
    Text(String),
    /// Trusted markup, emitted verbatim.
    Html(String),
}

/// Declarative description of a subtree to insert into a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewNode {
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    /// Attributes in insertion order; `None` marks a boolean attribute.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<(String, Option<String>)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ViewNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_click: Option<TourAction>,
}

impl ViewNode {
    pub fn element(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            key: None,
            classes: Vec::new(),
            attributes: Vec::new(),
            content: None,
            children: Vec::new(),
            on_click: None,
        }
    }

    pub fn keyed(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Appends a class. Empty names and repeats are skipped, so each class
    /// keeps the position of its first occurrence, as in a DOM class list.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !class.is_empty() && !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), Some(value.into())));
        self
    }

    pub fn flag(mut self, name: impl Into<String>) -> Self {
        self.attributes.push((name.into(), None));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.content = Some(Content::Text(text.into()));
        self
    }

    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.content = Some(Content::Html(html.into()));
        self
    }

    pub fn child(mut self, child: ViewNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn on_click(mut self, action: TourAction) -> Self {
        self.on_click = Some(action);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<Option<&str>> {
        self.attributes
            .iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, value)| value.as_deref())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Depth-first search for the first node carrying `class`.
    pub fn find_by_class(&self, class: &str) -> Option<&ViewNode> {
        if self.has_class(class) {
            return Some(self);
        }
        self.children
            .iter()
            .find_map(|child| child.find_by_class(class))
    }

    pub fn find_by_key(&self, key: &str) -> Option<&ViewNode> {
        if self.key.as_deref() == Some(key) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find_by_key(key))
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        if !self.classes.is_empty() {
            out.push_str(" class=\"");
            out.push_str(&escape_html(&self.classes.join(" ")));
            out.push('"');
        }
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            if let Some(value) = value {
                out.push_str("=\"");
                out.push_str(&escape_html(value));
                out.push('"');
            }
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            return;
        }

        match &self.content {
            Some(Content::Text(text)) => out.push_str(&escape_html(text)),
            Some(Content::Html(html)) => out.push_str(html),
            None => {}
        }
        for child in &self.children {
            child.write_html(out);
        }

        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Handles of a subtree after it has been inserted into a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountedView {
    pub root: ElementId,
    pub keyed: BTreeMap<String, ElementId>,
}

impl MountedView {
    pub fn element(&self, key: &str) -> Option<ElementId> {
        self.keyed.get(key).copied()
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
