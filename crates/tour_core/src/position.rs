//! Placement of float slides next to their target element.

use page::{ElementId, Page, Rect, ScrollMetrics, Viewport};
use shared::TourError;
use tracing::{debug, error};

use crate::{config::TourConfig, diagnostics::report};

pub const FLOATING_SLIDE_WIDTH: f64 = 360.0;
/// Lets page authors mark targets that have neither id nor class.
pub const TARGET_ATTRIBUTE: &str = "data-tour-target";
/// Keeps a highlighted target above the overlay.
pub const TARGET_Z_INDEX: &str = "10001";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Horizontal {
    Left(f64),
    Right(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub horizontal: Horizontal,
    pub top: f64,
    /// Pinned placements are relative to the viewport, others to the document.
    pub pinned: bool,
}

impl Placement {
    pub const ORIGIN: Placement = Placement {
        horizontal: Horizontal::Left(0.0),
        top: 0.0,
        pinned: true,
    };

    pub fn is_right_aligned(&self) -> bool {
        matches!(self.horizontal, Horizontal::Right(_))
    }
}

/// Selector used to find a float target: `#id` and `.class` pass through,
/// anything else names a `data-tour-target` value.
pub fn target_selector(target: &str) -> String {
    if target.starts_with('#') || target.starts_with('.') {
        return target.to_string();
    }
    let escaped = target.replace('\\', "\\\\").replace('"', "\\\"");
    format!("[{TARGET_ATTRIBUTE}=\"{escaped}\"]")
}

/// Converts a viewport-relative box to document coordinates.
pub fn absolute_box(rect: Rect, scroll: ScrollMetrics) -> Rect {
    rect.translate(scroll.x(), scroll.y())
}

pub fn compute_placement(target: Rect, viewport: Viewport) -> Placement {
    let horizontal = if target.left + FLOATING_SLIDE_WIDTH > viewport.width {
        Horizontal::Right(viewport.width - target.right())
    } else {
        Horizontal::Left(target.left)
    };
    // bottom overflow is not corrected
    Placement {
        horizontal,
        top: target.bottom(),
        pinned: false,
    }
}

/// Vertical offset that brings the bottom edge of `target` to mid-viewport.
pub fn auto_scroll_offset(target: Rect, viewport: Viewport) -> f64 {
    (target.bottom() - viewport.height / 2.0).max(0.0)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttachedTarget {
    element: ElementId,
    previous_z_index: Option<String>,
}

/// Tracks the page element the current float slide is attached to, so its
/// styling can be restored when the slide goes away.
#[derive(Debug, Default)]
pub struct FloatPositioner {
    attached: Option<AttachedTarget>,
}

impl FloatPositioner {
    pub fn attached(&self) -> Option<ElementId> {
        self.attached.as_ref().map(|target| target.element)
    }

    /// Positions `slide_element` next to the element named by `target`,
    /// falling back to the viewport origin when it cannot be resolved.
    pub fn position(
        &mut self,
        page: &mut impl Page,
        config: &TourConfig,
        target: Option<&str>,
        slide_element: ElementId,
    ) -> Placement {
        self.release(page, config);

        let Some(target) = target else {
            error!("tour: float slide has no target, pinned to origin");
            return pin_to_origin(page, config, slide_element);
        };

        let selector = target_selector(target);
        let element = match page.query_selector(&selector) {
            Ok(Some(element)) => element,
            Ok(None) => {
                let err = TourError::TargetNotFound { selector };
                report(&err, "float target unresolved, slide pinned to origin");
                return pin_to_origin(page, config, slide_element);
            }
            Err(err) => {
                error!(%target, error = %err, "tour: float target selector rejected, pinned to origin");
                return pin_to_origin(page, config, slide_element);
            }
        };

        let Some(rect) = page.bounding_rect(element) else {
            error!(%target, "tour: float target has no layout box, pinned to origin");
            return pin_to_origin(page, config, slide_element);
        };

        self.attach(page, config, element);

        let viewport = page.viewport();
        let scroll = page.scroll_metrics();
        let target_box = absolute_box(rect, scroll);
        let placement = compute_placement(target_box, viewport);
        apply_placement(page, config, slide_element, placement);
        debug!(%target, ?placement, "tour: float slide positioned");

        if config.auto_scroll {
            // horizontal auto-scroll is unsupported
            page.scroll_to(scroll.x(), auto_scroll_offset(target_box, viewport));
        }

        placement
    }

    /// Removes the highlight from the attached target and restores its inline
    /// styles.
    pub fn release(&mut self, page: &mut impl Page, config: &TourConfig) {
        let Some(target) = self.attached.take() else {
            return;
        };
        page.remove_class(target.element, &config.class("highlight"));
        match target.previous_z_index {
            Some(z_index) => page.set_style(target.element, "z-index", &z_index),
            None => page.remove_style(target.element, "z-index"),
        }
    }

    fn attach(&mut self, page: &mut impl Page, config: &TourConfig, element: ElementId) {
        let previous_z_index = page.style(element, "z-index");
        page.add_class(element, &config.class("highlight"));
        page.set_style(element, "z-index", TARGET_Z_INDEX);
        self.attached = Some(AttachedTarget {
            element,
            previous_z_index,
        });
    }
}

fn pin_to_origin(page: &mut impl Page, config: &TourConfig, slide_element: ElementId) -> Placement {
    apply_placement(page, config, slide_element, Placement::ORIGIN);
    Placement::ORIGIN
}

fn px(value: f64) -> String {
    format!("{value}px")
}

fn apply_placement(page: &mut impl Page, config: &TourConfig, slide_element: ElementId, placement: Placement) {
    let position = if placement.pinned { "fixed" } else { "absolute" };
    page.set_style(slide_element, "position", position);
    page.set_style(slide_element, "top", &px(placement.top));

    let right_aligned = config.class("right-aligned");
    match placement.horizontal {
        Horizontal::Left(left) => {
            page.set_style(slide_element, "left", &px(left));
            page.remove_style(slide_element, "right");
            page.remove_class(slide_element, &right_aligned);
        }
        Horizontal::Right(right) => {
            page.set_style(slide_element, "right", &px(right));
            page.remove_style(slide_element, "left");
            page.add_class(slide_element, &right_aligned);
        }
    }
}

#[cfg(test)]
#[path = "tests/position_tests.rs"]
mod tests;
