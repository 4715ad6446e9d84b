mod circle;
mod line;
mod operations;
mod query;
mod rectangle;
mod selection;
mod text;

pub use crate::geometry::{Color, ImageBounds, ToolPoint};
pub use circle::CircleElement;
pub use line::LineElement;
pub use rectangle::{CornerBinding, RectangleElement};
pub use text::{
    clamp_font_scale, TextElement, TEXT_CHAR_WIDTH_RATIO, TEXT_LINE_HEIGHT_PER_SCALE,
    TEXT_MAX_FONT_SCALE, TEXT_MIN_FONT_SCALE,
};
use thiserror::Error;

pub const STROKE_WIDTH_MIN: f64 = 1.0;
pub const STROKE_WIDTH_MAX: f64 = 20.0;
const DEFAULT_STROKE_COLOR: Color = Color::new(0xFF, 0x00, 0x00);
const DEFAULT_STROKE_WIDTH: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolKind {
    #[default]
    Line,
    Rectangle,
    Circle,
    Text,
}

impl ToolKind {
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Text => "text",
        }
    }

    pub const fn is_drag_tool(self) -> bool {
        !matches!(self, Self::Text)
    }
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeStyle {
    pub color: Color,
    pub stroke_width: f64,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            color: DEFAULT_STROKE_COLOR,
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }
}

impl ShapeStyle {
    pub fn new(color: Color, stroke_width: f64) -> Self {
        let mut style = Self {
            color,
            stroke_width: DEFAULT_STROKE_WIDTH,
        };
        style.set_stroke_width(stroke_width);
        style
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_stroke_width(&mut self, stroke_width: f64) {
        self.stroke_width = if stroke_width.is_nan() {
            STROKE_WIDTH_MIN
        } else {
            stroke_width.clamp(STROKE_WIDTH_MIN, STROKE_WIDTH_MAX)
        };
    }
}

/// Resize control on a selected shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeHandle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Radius,
    Start,
    End,
    TextBottomRight,
}

/// A handle bound to the stored coordinates it drives for the length of one
/// resize drag. Rectangle corners are resolved once so that crossing the
/// opposite edge keeps moving the same stored corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeGrip {
    handle: ShapeHandle,
    corner: Option<CornerBinding>,
}

impl ResizeGrip {
    pub const fn handle(self) -> ShapeHandle {
        self.handle
    }
}

/// Inclusive bounding box in image space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeBounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl ShapeBounds {
    pub fn expanded(self, padding: f64) -> Self {
        Self {
            left: self.left - padding,
            top: self.top - padding,
            right: self.right + padding,
            bottom: self.bottom + padding,
        }
    }

    pub fn width(self) -> f64 {
        self.right - self.left
    }

    pub fn height(self) -> f64 {
        self.bottom - self.top
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line(LineElement),
    Rectangle(RectangleElement),
    Circle(CircleElement),
    Text(TextElement),
}

impl Shape {
    pub const fn kind(&self) -> ToolKind {
        match self {
            Self::Line(_) => ToolKind::Line,
            Self::Rectangle(_) => ToolKind::Rectangle,
            Self::Circle(_) => ToolKind::Circle,
            Self::Text(_) => ToolKind::Text,
        }
    }

    pub const fn style(&self) -> ShapeStyle {
        match self {
            Self::Line(line) => line.style,
            Self::Rectangle(rectangle) => rectangle.style,
            Self::Circle(circle) => circle.style,
            Self::Text(text) => text.style,
        }
    }

    /// Point a move gesture keeps under the pointer offset.
    pub const fn reference_point(&self) -> ToolPoint {
        match self {
            Self::Line(line) => line.midpoint(),
            Self::Rectangle(rectangle) => rectangle.start,
            Self::Circle(circle) => circle.center,
            Self::Text(text) => text.anchor(),
        }
    }

    pub fn bounds(&self) -> ShapeBounds {
        match self {
            Self::Line(LineElement { start, end, .. })
            | Self::Rectangle(RectangleElement { start, end, .. }) => ShapeBounds {
                left: f64::from(start.x.min(end.x)),
                top: f64::from(start.y.min(end.y)),
                right: f64::from(start.x.max(end.x)),
                bottom: f64::from(start.y.max(end.y)),
            },
            Self::Circle(circle) => {
                let radius = circle.radius();
                let center_x = f64::from(circle.center.x);
                let center_y = f64::from(circle.center.y);
                ShapeBounds {
                    left: center_x - radius,
                    top: center_y - radius,
                    right: center_x + radius,
                    bottom: center_y + radius,
                }
            }
            Self::Text(text) => ShapeBounds {
                left: f64::from(text.x),
                top: f64::from(text.y) - text.box_height(),
                right: f64::from(text.x) + text.box_width(),
                bottom: f64::from(text.y),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    #[error("text content is empty")]
    EmptyText,
    #[error("shape has no extent")]
    DegenerateShape,
    #[error("{0} shapes are placed with a click, not a drag")]
    NotADragTool(ToolKind),
    #[error("no shape at index {0}")]
    ShapeNotFound(usize),
    #[error("handle {handle:?} does not apply to a {kind} shape")]
    HandleMismatch { kind: ToolKind, handle: ShapeHandle },
}

/// Ordered shape arena for one editing session, plus the single selection.
///
/// Insertion order is z-order: later shapes draw on top and win hit-tests.
#[derive(Debug, Clone, Default)]
pub struct EditorTools {
    active_tool: ToolKind,
    style: ShapeStyle,
    shapes: Vec<Shape>,
    selected: Option<usize>,
}

impl EditorTools {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(style: ShapeStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    pub fn select_tool(&mut self, tool: ToolKind) {
        self.active_tool = tool;
    }

    pub fn set_style(&mut self, style: ShapeStyle) {
        self.style = style;
    }

    pub fn set_color(&mut self, color: Color) {
        self.style.set_color(color);
    }

    pub fn set_stroke_width(&mut self, stroke_width: f64) {
        self.style.set_stroke_width(stroke_width);
    }

    fn check_index(&self, index: usize) -> Result<(), ToolError> {
        if index < self.shapes.len() {
            Ok(())
        } else {
            Err(ToolError::ShapeNotFound(index))
        }
    }
}
