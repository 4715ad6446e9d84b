use super::{ShapeStyle, ToolPoint};

/// Axis-aligned rectangle stored as the two corners the user dragged between.
/// The corners are not normalized; use [`RectangleElement::min_corner`] and
/// [`RectangleElement::max_corner`] wherever ordering matters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectangleElement {
    pub start: ToolPoint,
    pub end: ToolPoint,
    pub style: ShapeStyle,
}

impl RectangleElement {
    pub const fn new(start: ToolPoint, end: ToolPoint, style: ShapeStyle) -> Self {
        Self { start, end, style }
    }

    pub fn min_corner(&self) -> ToolPoint {
        ToolPoint::new(self.start.x.min(self.end.x), self.start.y.min(self.end.y))
    }

    pub fn max_corner(&self) -> ToolPoint {
        ToolPoint::new(self.start.x.max(self.end.x), self.start.y.max(self.end.y))
    }

    pub fn width(&self) -> i32 {
        self.max_corner().x - self.min_corner().x
    }

    pub fn height(&self) -> i32 {
        self.max_corner().y - self.min_corner().y
    }

    /// Stored coordinates that currently hold the requested edges.
    pub fn bind_corner(&self, left: bool, top: bool) -> CornerBinding {
        CornerBinding {
            x_in_start: (self.start.x <= self.end.x) == left,
            y_in_start: (self.start.y <= self.end.y) == top,
        }
    }

    /// Writes `point` into the bound coordinates only; the opposite edges stay put
    /// even after the corner crosses them.
    pub fn move_corner(&mut self, binding: CornerBinding, point: ToolPoint) {
        if binding.x_in_start {
            self.start.x = point.x;
        } else {
            self.end.x = point.x;
        }
        if binding.y_in_start {
            self.start.y = point.y;
        } else {
            self.end.y = point.y;
        }
    }
}

/// Which stored corner supplies a dragged corner's x and y.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CornerBinding {
    pub x_in_start: bool,
    pub y_in_start: bool,
}
