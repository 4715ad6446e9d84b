use super::{ShapeStyle, ToolPoint};

pub const TEXT_MIN_FONT_SCALE: f64 = 1.0;
pub const TEXT_MAX_FONT_SCALE: f64 = 5.0;
pub const TEXT_LINE_HEIGHT_PER_SCALE: f64 = 10.0;
pub const TEXT_CHAR_WIDTH_RATIO: f64 = 0.6;

/// Text anchored at its baseline: `(x, y)` is the bottom-left of its box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    pub x: i32,
    pub y: i32,
    pub content: String,
    pub font_scale: f64,
    pub style: ShapeStyle,
}

impl TextElement {
    /// The font scale starts at the stroke width as is; only the resize handle
    /// is limited to the 1..=5 range.
    pub fn new(anchor: ToolPoint, content: impl Into<String>, style: ShapeStyle) -> Self {
        Self {
            x: anchor.x,
            y: anchor.y,
            content: content.into(),
            font_scale: style.stroke_width,
            style,
        }
    }

    pub const fn anchor(&self) -> ToolPoint {
        ToolPoint::new(self.x, self.y)
    }

    pub fn font_size(&self) -> f64 {
        self.font_scale * TEXT_LINE_HEIGHT_PER_SCALE
    }

    pub fn box_height(&self) -> f64 {
        self.font_size()
    }

    pub fn box_width(&self) -> f64 {
        self.font_size() * TEXT_CHAR_WIDTH_RATIO * self.content.chars().count() as f64
    }

    /// Recomputes the font scale so the box spans `width` pixels.
    pub fn set_scale_from_width(&mut self, width: f64) {
        let per_scale = TEXT_LINE_HEIGHT_PER_SCALE
            * TEXT_CHAR_WIDTH_RATIO
            * self.content.chars().count().max(1) as f64;
        self.font_scale = clamp_font_scale(width / per_scale);
    }
}

pub fn clamp_font_scale(scale: f64) -> f64 {
    if scale.is_nan() {
        TEXT_MIN_FONT_SCALE
    } else {
        scale.clamp(TEXT_MIN_FONT_SCALE, TEXT_MAX_FONT_SCALE)
    }
}
