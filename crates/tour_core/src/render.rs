//! Slide view construction. Pure: the same slide, position and config always
//! produce the same tree.

use page::ViewNode;
use shared::{Media, MediaKind, Slide, TourAction, TourError};

use crate::{config::TourConfig, diagnostics::report};

/// Key of the slide node inside a rendered wrapper.
pub const SLIDE_KEY: &str = "slide";

pub fn render_slide(slide: &Slide, index: usize, total: usize, config: &TourConfig) -> ViewNode {
    let slide_number = index + 1;
    let mut wrapper = ViewNode::element("div").class(config.class("wrapper"));

    if config.overlay {
        let mut overlay = ViewNode::element("div").class(config.class("overlay"));
        if config.click_overlay_closes_tour {
            overlay = overlay.on_click(TourAction::Stop);
        }
        wrapper = wrapper.child(overlay);
    }

    let mut node = ViewNode::element("div")
        .keyed(SLIDE_KEY)
        .class(config.class("slide"))
        .class(config.class(&format!("slide-{}", slide.style.as_str())))
        .attr("data-slide", slide_number.to_string());
    for class in &slide.extra_classes {
        node = node.class(class.clone());
    }

    if let Some(media) = &slide.media {
        if let Some(media) = render_media(media, slide, slide_number, config) {
            node = node.child(media);
        }
    }

    node = node
        .child(
            ViewNode::element("h2")
                .class(config.class("title"))
                .text(slide.title.clone()),
        )
        .child(
            ViewNode::element("div")
                .class(config.class("body"))
                .text(slide.body.clone()),
        )
        .child(render_buttons(index, total, config));

    wrapper.child(node)
}

fn render_media(media: &Media, slide: &Slide, slide_number: usize, config: &TourConfig) -> Option<ViewNode> {
    let Some(kind) = media.media_kind() else {
        let err = TourError::UnsupportedMedia {
            slide: slide_number,
            kind: media.kind.clone(),
        };
        report(&err, "media omitted");
        return None;
    };

    let mut element = ViewNode::element(kind.tag()).class(config.class("media-element"));
    match media.source() {
        Some(url) => element = element.attr("src", url),
        None => report(
            &TourError::MissingMediaUrl {
                slide: slide_number,
            },
            "media rendered without a source",
        ),
    }

    match kind {
        MediaKind::Image => {
            element = element.attr("alt", slide.title.clone());
        }
        MediaKind::Video => {
            if media.autoplay {
                element = element.flag("autoplay");
            }
            if media.muted {
                element = element.flag("muted");
            }
            if media.controls {
                element = element.flag("controls");
            }
            if media.looped {
                element = element.flag("loop");
            }
        }
    }

    Some(
        ViewNode::element("div")
            .class(config.class("media"))
            .child(element),
    )
}

fn render_buttons(index: usize, total: usize, config: &TourConfig) -> ViewNode {
    let button = |name: &str, html: &str, action: TourAction| {
        ViewNode::element("button")
            .class(config.class("button"))
            .class(config.class(&format!("button-{name}")))
            .attr("type", "button")
            .html(html.to_string())
            .on_click(action)
    };

    let mut row = ViewNode::element("div")
        .class(config.class("buttons"))
        .child(button("exit", &config.button_html.exit, TourAction::Stop));
    if index > 0 {
        row = row.child(button("prev", &config.button_html.prev, TourAction::Previous));
    }
    if index + 1 < total {
        row = row.child(button("next", &config.button_html.next, TourAction::Next));
    }
    row
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
