//! Arena-backed page used when no real document is available: tests, the
//! CLI, and any host that lays out elements itself.

use std::collections::{BTreeMap, HashMap};

use shared::TourAction;
use tracing::debug;

use crate::{
    geometry::{Rect, ScrollMetrics, Viewport},
    selector::{Compound, Matchable, Selector},
    view::{Content, MountedView, ViewNode},
    ElementId, ListenerId, ListenerKind, Page, PageError,
};

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    styles: Vec<(String, String)>,
    content: Option<Content>,
    layout: Option<Rect>,
    on_click: Option<TourAction>,
}

impl Node {
    fn new(tag: &str, parent: Option<ElementId>) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            parent,
            children: Vec::new(),
            attributes: BTreeMap::new(),
            classes: Vec::new(),
            styles: Vec::new(),
            content: None,
            layout: None,
            on_click: None,
        }
    }
}

impl Matchable for Node {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

#[derive(Debug, Clone)]
pub struct MemoryPage {
    /// Live nodes only; ids are never reused, so a stale id finds nothing.
    nodes: BTreeMap<ElementId, Node>,
    next_element: usize,
    body: ElementId,
    viewport: Viewport,
    scroll: ScrollMetrics,
    listeners: HashMap<ListenerId, ListenerKind>,
    next_listener: u64,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl MemoryPage {
    pub fn new(viewport: Viewport) -> Self {
        let body = ElementId(0);
        Self {
            nodes: BTreeMap::from([(body, Node::new("body", None))]),
            next_element: 1,
            body,
            viewport,
            scroll: ScrollMetrics::at(0.0, 0.0),
            listeners: HashMap::new(),
            next_listener: 1,
        }
    }

    pub fn body(&self) -> ElementId {
        self.body
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn set_scroll_metrics(&mut self, scroll: ScrollMetrics) {
        self.scroll = scroll;
    }

    pub fn append_element(&mut self, parent: ElementId, tag: &str) -> ElementId {
        let id = ElementId(self.next_element);
        self.next_element += 1;
        self.nodes.insert(id, Node::new(tag, Some(parent)));
        if let Some(parent) = self.nodes.get_mut(&parent) {
            parent.children.push(id);
        }
        id
    }

    pub fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        let Some(node) = self.nodes.get_mut(&element) else {
            return;
        };
        if name == "class" {
            node.classes = value.split_whitespace().map(str::to_string).collect();
        } else {
            node.attributes.insert(name.to_string(), value.to_string());
        }
    }

    pub fn attribute(&self, element: ElementId, name: &str) -> Option<&str> {
        self.nodes.get(&element)?.attribute(name)
    }

    pub fn tag(&self, element: ElementId) -> Option<&str> {
        self.nodes.get(&element).map(|node| node.tag.as_str())
    }

    pub fn content(&self, element: ElementId) -> Option<&Content> {
        self.nodes.get(&element)?.content.as_ref()
    }

    pub fn children(&self, element: ElementId) -> &[ElementId] {
        self.nodes
            .get(&element)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    /// Sets the element's box in document coordinates.
    pub fn set_layout(&mut self, element: ElementId, rect: Rect) {
        if let Some(node) = self.nodes.get_mut(&element) {
            node.layout = Some(rect);
        }
    }

    pub fn is_connected(&self, element: ElementId) -> bool {
        let mut current = Some(element);
        while let Some(id) = current {
            if id == self.body {
                return true;
            }
            current = self.nodes.get(&id).and_then(|node| node.parent);
        }
        false
    }

    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<ElementId>, PageError> {
        let selector = Selector::parse(selector)?;
        Ok(self
            .document_order()
            .into_iter()
            .filter(|id| self.matches(*id, &selector))
            .collect())
    }

    /// Connected elements carrying `class`, in document order.
    pub fn elements_with_class(&self, class: &str) -> Vec<ElementId> {
        self.document_order()
            .into_iter()
            .filter(|id| self.nodes.get(id).is_some_and(|node| node.has_class(class)))
            .collect()
    }

    /// Number of live nodes, body included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn listener_count(&self, kind: ListenerKind) -> usize {
        self.listeners.values().filter(|k| **k == kind).count()
    }

    fn document_order(&self) -> Vec<ElementId> {
        let mut order = Vec::new();
        let mut stack = vec![self.body];
        while let Some(id) = stack.pop() {
            if id != self.body {
                order.push(id);
            }
            if let Some(node) = self.nodes.get(&id) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        order
    }

    fn matches(&self, element: ElementId, selector: &Selector) -> bool {
        let Some((subject, ancestors)) = selector.chain.split_last() else {
            return false;
        };
        let Some(node) = self.nodes.get(&element) else {
            return false;
        };
        if !subject.matches(node) {
            return false;
        }
        self.ancestors_match(element, ancestors)
    }

    fn ancestors_match(&self, element: ElementId, ancestors: &[Compound]) -> bool {
        let Some((nearest, rest)) = ancestors.split_last() else {
            return true;
        };
        let mut current = self.nodes.get(&element).and_then(|node| node.parent);
        while let Some(id) = current {
            if id == self.body {
                break;
            }
            let Some(node) = self.nodes.get(&id) else {
                break;
            };
            if nearest.matches(node) && self.ancestors_match(id, rest) {
                return true;
            }
            current = node.parent;
        }
        false
    }

    fn insert_view(&mut self, parent: ElementId, view: &ViewNode, keyed: &mut BTreeMap<String, ElementId>) -> ElementId {
        let id = self.append_element(parent, &view.tag);
        if let Some(node) = self.nodes.get_mut(&id) {
            node.classes = view.classes.clone();
            for (name, value) in &view.attributes {
                node.attributes
                    .insert(name.clone(), value.clone().unwrap_or_default());
            }
            node.content = view.content.clone();
            node.on_click = view.on_click;
        }
        if let Some(key) = &view.key {
            keyed.insert(key.clone(), id);
        }
        for child in &view.children {
            self.insert_view(id, child, keyed);
        }
        id
    }
}

impl Page for MemoryPage {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        self.scroll
    }

    fn scroll_to(&mut self, x: f64, y: f64) {
        self.scroll = if self.scroll.scroll_x.is_some() {
            ScrollMetrics::at(x, y)
        } else {
            ScrollMetrics::legacy(x, y)
        };
    }

    fn query_selector(&self, selector: &str) -> Result<Option<ElementId>, PageError> {
        let selector = Selector::parse(selector)?;
        Ok(self
            .document_order()
            .into_iter()
            .find(|id| self.matches(*id, &selector)))
    }

    fn bounding_rect(&self, element: ElementId) -> Option<Rect> {
        if !self.is_connected(element) {
            return None;
        }
        let layout = self.nodes.get(&element)?.layout?;
        Some(layout.translate(-self.scroll.x(), -self.scroll.y()))
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.nodes
            .get(&element)
            .is_some_and(|node| node.has_class(class))
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        if let Some(node) = self.nodes.get_mut(&element) {
            if !node.has_class(class) {
                node.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        if let Some(node) = self.nodes.get_mut(&element) {
            node.classes.retain(|c| c != class);
        }
    }

    fn style(&self, element: ElementId, property: &str) -> Option<String> {
        self.nodes
            .get(&element)?
            .styles
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.clone())
    }

    fn set_style(&mut self, element: ElementId, property: &str, value: &str) {
        let Some(node) = self.nodes.get_mut(&element) else {
            return;
        };
        match node.styles.iter_mut().find(|(name, _)| name == property) {
            Some((_, existing)) => *existing = value.to_string(),
            None => node.styles.push((property.to_string(), value.to_string())),
        }
    }

    fn remove_style(&mut self, element: ElementId, property: &str) {
        if let Some(node) = self.nodes.get_mut(&element) {
            node.styles.retain(|(name, _)| name != property);
        }
    }

    fn mount(&mut self, view: &ViewNode) -> MountedView {
        let mut keyed = BTreeMap::new();
        let root = self.insert_view(self.body, view, &mut keyed);
        debug!(root = root.0, tag = %view.tag, "page: mounted view");
        MountedView { root, keyed }
    }

    fn unmount(&mut self, element: ElementId) {
        if element == self.body {
            return;
        }
        let Some(parent) = self.nodes.get(&element).and_then(|node| node.parent) else {
            return;
        };
        if let Some(parent) = self.nodes.get_mut(&parent) {
            parent.children.retain(|child| *child != element);
        }
        let mut stack = vec![element];
        let mut removed = 0;
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.remove(&id) {
                stack.extend(node.children);
                removed += 1;
            }
        }
        debug!(root = element.0, removed, "page: unmounted view");
    }

    fn click_action(&self, element: ElementId) -> Option<TourAction> {
        if !self.is_connected(element) {
            return None;
        }
        let mut current = Some(element);
        while let Some(id) = current {
            let node = self.nodes.get(&id)?;
            if let Some(action) = node.on_click {
                return Some(action);
            }
            current = node.parent;
        }
        None
    }

    fn add_listener(&mut self, kind: ListenerKind) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.insert(id, kind);
        id
    }

    fn remove_listener(&mut self, listener: ListenerId) {
        self.listeners.remove(&listener);
    }
}

#[cfg(test)]
#[path = "tests/memory_tests.rs"]
mod tests;
