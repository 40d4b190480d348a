use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Configuration,
    Transport,
    Usage,
}

/// Diagnostics raised while loading or playing a tour. Slide numbers are
/// 1-based, matching what a flow author sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TourError {
    #[error("no flow loaded")]
    NoFlow,
    #[error("slide {requested} is out of range (flow has {total} slides)")]
    SlideOutOfRange { requested: usize, total: usize },
    #[error("slide {slide} has no title")]
    EmptyTitle { slide: usize },
    #[error("float slide {slide} has no target")]
    MissingTarget { slide: usize },
    #[error("target `{selector}` not found")]
    TargetNotFound { selector: String },
    #[error("slide {slide} has unsupported media type {kind:?}")]
    UnsupportedMedia { slide: usize, kind: Option<String> },
    #[error("media on slide {slide} has no url")]
    MissingMediaUrl { slide: usize },
    #[error("failed to fetch flow from {url}: {message}")]
    Fetch { url: String, message: String },
    #[error("failed to parse flow from {url}: {message}")]
    Parse { url: String, message: String },
    #[error("already at the first slide")]
    AtFirstSlide,
}

impl TourError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TourError::Fetch { .. } | TourError::Parse { .. } => ErrorKind::Transport,
            TourError::NoFlow | TourError::AtFirstSlide => ErrorKind::Usage,
            TourError::SlideOutOfRange { .. }
            | TourError::EmptyTitle { .. }
            | TourError::MissingTarget { .. }
            | TourError::TargetNotFound { .. }
            | TourError::UnsupportedMedia { .. }
            | TourError::MissingMediaUrl { .. } => ErrorKind::Configuration,
        }
    }
}

#[cfg(test)]
#[path = "tests/error_tests.rs"]
mod tests;
