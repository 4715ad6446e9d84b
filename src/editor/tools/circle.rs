use super::{ShapeStyle, ToolPoint};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleElement {
    pub center: ToolPoint,
    pub edge: ToolPoint,
    pub style: ShapeStyle,
}

impl CircleElement {
    pub const fn new(center: ToolPoint, edge: ToolPoint, style: ShapeStyle) -> Self {
        Self {
            center,
            edge,
            style,
        }
    }

    pub fn radius(&self) -> f64 {
        self.center.distance_to(self.edge)
    }
}
