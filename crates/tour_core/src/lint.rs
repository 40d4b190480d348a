use shared::{Flow, SlideStyle, TourError};

/// Authoring problems in a flow, in slide order. None of them stop a tour
/// from playing; each shows up as a degraded slide.
pub fn lint_flow(flow: &Flow) -> Vec<TourError> {
    let mut issues = Vec::new();
    for (index, slide) in flow.slides().iter().enumerate() {
        let slide_number = index + 1;
        if slide.title.trim().is_empty() {
            issues.push(TourError::EmptyTitle {
                slide: slide_number,
            });
        }
        if slide.style == SlideStyle::Float && slide.float_target().is_none() {
            issues.push(TourError::MissingTarget {
                slide: slide_number,
            });
        }
        if let Some(media) = &slide.media {
            if media.media_kind().is_none() {
                issues.push(TourError::UnsupportedMedia {
                    slide: slide_number,
                    kind: media.kind.clone(),
                });
            }
            if media.source().is_none() {
                issues.push(TourError::MissingMediaUrl {
                    slide: slide_number,
                });
            }
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Media, MediaKind, Slide};

    #[test]
    fn clean_flow_has_no_issues() {
        let flow = Flow::new(vec![
            Slide::new("Intro", "hi").with_media(Media::new(MediaKind::Image, "a.png")),
            Slide::new("Save", "here").floating("save-button"),
        ]);
        assert!(lint_flow(&flow).is_empty());
    }

    #[test]
    fn reports_each_problem_with_slide_number() {
        let mut bad_media = Media::new(MediaKind::Video, "");
        bad_media.kind = Some("gif".into());
        let flow = Flow::new(vec![
            Slide::new("Ok", "fine"),
            Slide::new("", "no title").with_style(SlideStyle::Float),
            Slide::new("Clip", "b").with_media(bad_media),
        ]);

        assert_eq!(
            lint_flow(&flow),
            vec![
                TourError::EmptyTitle { slide: 2 },
                TourError::MissingTarget { slide: 2 },
                TourError::UnsupportedMedia {
                    slide: 3,
                    kind: Some("gif".into()),
                },
                TourError::MissingMediaUrl { slide: 3 },
            ]
        );
    }
}
