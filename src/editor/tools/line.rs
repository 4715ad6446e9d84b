use super::{ShapeStyle, ToolPoint};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineElement {
    pub start: ToolPoint,
    pub end: ToolPoint,
    pub style: ShapeStyle,
}

impl LineElement {
    pub const fn new(start: ToolPoint, end: ToolPoint, style: ShapeStyle) -> Self {
        Self { start, end, style }
    }

    /// Floor-division midpoint, so translating both endpoints by `d` moves it by exactly `d`.
    pub const fn midpoint(&self) -> ToolPoint {
        ToolPoint::new(
            floor_half_sum(self.start.x, self.end.x),
            floor_half_sum(self.start.y, self.end.y),
        )
    }

    pub const fn is_degenerate(&self) -> bool {
        self.start.x == self.end.x && self.start.y == self.end.y
    }
}

/// `floor((a + b) / 2)` without overflowing; the result always fits in `i32`.
const fn floor_half_sum(a: i32, b: i32) -> i32 {
    (a as i64 + b as i64).div_euclid(2) as i32
}
