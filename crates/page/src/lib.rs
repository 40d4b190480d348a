//! Host page abstraction for the tour engine: the `Page` trait a host
//! implements, declarative view trees, and an in-memory page used headless.

pub mod geometry;
pub mod memory;
pub mod selector;
pub mod view;

use shared::TourAction;
use thiserror::Error;

pub use geometry::{Rect, ScrollMetrics, Viewport};
pub use memory::MemoryPage;
pub use selector::Selector;
pub use view::{escape_html, Content, MountedView, ViewNode};

macro_rules! handle_newtype {
    ($name:ident, $inner:ty) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub $inner);
    };
}

handle_newtype!(ElementId, usize);
handle_newtype!(ListenerId, u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    Resize,
    KeyDown,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },
    #[error("unsupported selector `{0}`")]
    UnsupportedSelector(String),
}

/// Operations the tour engine needs from the page it decorates.
///
/// Element handles are never owned by the engine: it styles them and restores
/// them, nothing more. `bounding_rect` is relative to the viewport, like
/// `Element.getBoundingClientRect`.
pub trait Page {
    fn viewport(&self) -> Viewport;
    fn scroll_metrics(&self) -> ScrollMetrics;
    fn scroll_to(&mut self, x: f64, y: f64);

    fn query_selector(&self, selector: &str) -> Result<Option<ElementId>, PageError>;
    fn bounding_rect(&self, element: ElementId) -> Option<Rect>;

    fn has_class(&self, element: ElementId, class: &str) -> bool;
    fn add_class(&mut self, element: ElementId, class: &str);
    fn remove_class(&mut self, element: ElementId, class: &str);

    fn style(&self, element: ElementId, property: &str) -> Option<String>;
    fn set_style(&mut self, element: ElementId, property: &str, value: &str);
    fn remove_style(&mut self, element: ElementId, property: &str);

    /// Appends the view to the document body.
    fn mount(&mut self, view: &ViewNode) -> MountedView;
    fn unmount(&mut self, element: ElementId);

    /// Action bound to a click on `element`, found by bubbling towards the
    /// document body.
    fn click_action(&self, element: ElementId) -> Option<TourAction>;

    fn add_listener(&mut self, kind: ListenerKind) -> ListenerId;
    fn remove_listener(&mut self, listener: ListenerId);
}
