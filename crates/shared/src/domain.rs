use serde::{Deserialize, Serialize};

macro_rules! name_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

name_newtype!(HookName);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideStyle {
    #[default]
    Modal,
    Float,
    Sidebar,
}

impl SlideStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            SlideStyle::Modal => "modal",
            SlideStyle::Float => "float",
            SlideStyle::Sidebar => "sidebar",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn tag(self) -> &'static str {
        match self {
            MediaKind::Image => "img",
            MediaKind::Video => "video",
        }
    }
}

fn default_true() -> bool {
    true
}

/// Media block shown above a slide's title.
///
/// `type` is kept as raw text so an unrecognised value survives parsing and
/// can be reported when the slide is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default = "default_true")]
    pub autoplay: bool,
    #[serde(default = "default_true")]
    pub muted: bool,
    #[serde(default)]
    pub controls: bool,
    #[serde(rename = "loop", default = "default_true")]
    pub looped: bool,
}

impl Media {
    pub fn new(kind: MediaKind, url: impl Into<String>) -> Self {
        let kind = match kind {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        };
        Self {
            kind: Some(kind.to_string()),
            url: Some(url.into()),
            autoplay: true,
            muted: true,
            controls: false,
            looped: true,
        }
    }

    pub fn media_kind(&self) -> Option<MediaKind> {
        let kind = self.kind.as_deref()?.trim();
        if kind.eq_ignore_ascii_case("image") {
            Some(MediaKind::Image)
        } else if kind.eq_ignore_ascii_case("video") {
            Some(MediaKind::Video)
        } else {
            None
        }
    }

    pub fn source(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub style: SlideStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<Media>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_classes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_show: Option<HookName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_end: Option<HookName>,
}

impl Slide {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            ..Self::default()
        }
    }

    pub fn floating(mut self, target: impl Into<String>) -> Self {
        self.style = SlideStyle::Float;
        self.target = Some(target.into());
        self
    }

    pub fn with_style(mut self, style: SlideStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_media(mut self, media: Media) -> Self {
        self.media = Some(media);
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.extra_classes.push(class.into());
        self
    }

    pub fn on_show(mut self, hook: impl Into<String>) -> Self {
        self.on_show = Some(HookName::new(hook));
        self
    }

    pub fn on_end(mut self, hook: impl Into<String>) -> Self {
        self.on_end = Some(HookName::new(hook));
        self
    }

    /// Target selector of a float slide, ignoring blank values.
    pub fn float_target(&self) -> Option<&str> {
        self.target
            .as_deref()
            .map(str::trim)
            .filter(|target| !target.is_empty())
    }
}

/// Ordered slides of one guided tour, as found in a flow file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Flow {
    slides: Vec<Slide>,
}

impl Flow {
    pub fn new(slides: Vec<Slide>) -> Self {
        Self { slides }
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}

impl From<Vec<Slide>> for Flow {
    fn from(slides: Vec<Slide>) -> Self {
        Self::new(slides)
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
