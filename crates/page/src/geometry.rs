#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            left: self.left + dx,
            top: self.top + dy,
            ..*self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// Window scroll position as a page reports it. Engines without
/// `scrollX`/`scrollY` only expose `pageXOffset`/`pageYOffset`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub scroll_x: Option<f64>,
    pub scroll_y: Option<f64>,
    pub page_x_offset: f64,
    pub page_y_offset: f64,
}

impl ScrollMetrics {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            scroll_x: Some(x),
            scroll_y: Some(y),
            page_x_offset: x,
            page_y_offset: y,
        }
    }

    pub fn legacy(x: f64, y: f64) -> Self {
        Self {
            scroll_x: None,
            scroll_y: None,
            page_x_offset: x,
            page_y_offset: y,
        }
    }

    pub fn x(&self) -> f64 {
        self.scroll_x.unwrap_or(self.page_x_offset)
    }

    pub fn y(&self) -> f64 {
        self.scroll_y.unwrap_or(self.page_y_offset)
    }
}
