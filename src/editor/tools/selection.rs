use super::*;

impl EditorTools {
    pub fn select(&mut self, index: Option<usize>) -> Result<(), ToolError> {
        if let Some(index) = index {
            self.check_index(index)?;
        }
        self.selected = index;
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Translates the shape so its reference point lands on `reference`.
    pub fn move_shape_to(&mut self, index: usize, reference: ToolPoint) -> Result<(), ToolError> {
        self.check_index(index)?;
        let shape = &mut self.shapes[index];
        let current = shape.reference_point();
        let delta_x = reference.x.saturating_sub(current.x);
        let delta_y = reference.y.saturating_sub(current.y);
        match shape {
            Shape::Line(line) => {
                line.start = line.start.offset(delta_x, delta_y);
                line.end = line.end.offset(delta_x, delta_y);
            }
            Shape::Rectangle(rectangle) => {
                rectangle.start = reference;
                rectangle.end = rectangle.end.offset(delta_x, delta_y);
            }
            Shape::Circle(circle) => {
                circle.center = reference;
                circle.edge = circle.edge.offset(delta_x, delta_y);
            }
            Shape::Text(text) => {
                text.x = reference.x;
                text.y = reference.y;
            }
        }
        Ok(())
    }

    /// Binds `handle` to the shape's current geometry; pass the grip to every
    /// [`EditorTools::resize_shape`] call of the same drag.
    pub fn grip(&self, index: usize, handle: ShapeHandle) -> Result<ResizeGrip, ToolError> {
        let shape = self
            .shapes
            .get(index)
            .ok_or(ToolError::ShapeNotFound(index))?;
        let corner = match (shape, handle) {
            (Shape::Rectangle(rectangle), ShapeHandle::TopLeft) => {
                Some(rectangle.bind_corner(true, true))
            }
            (Shape::Rectangle(rectangle), ShapeHandle::TopRight) => {
                Some(rectangle.bind_corner(false, true))
            }
            (Shape::Rectangle(rectangle), ShapeHandle::BottomLeft) => {
                Some(rectangle.bind_corner(true, false))
            }
            (Shape::Rectangle(rectangle), ShapeHandle::BottomRight) => {
                Some(rectangle.bind_corner(false, false))
            }
            (Shape::Circle(_), ShapeHandle::Radius)
            | (Shape::Line(_), ShapeHandle::Start | ShapeHandle::End)
            | (Shape::Text(_), ShapeHandle::TextBottomRight) => None,
            (shape, handle) => {
                return Err(ToolError::HandleMismatch {
                    kind: shape.kind(),
                    handle,
                })
            }
        };
        Ok(ResizeGrip { handle, corner })
    }

    /// Drags the gripped handle to `point`; every other control point stays put.
    pub fn resize_shape(
        &mut self,
        index: usize,
        grip: ResizeGrip,
        point: ToolPoint,
    ) -> Result<(), ToolError> {
        self.check_index(index)?;
        let shape = &mut self.shapes[index];
        let kind = shape.kind();
        match (shape, grip.handle, grip.corner) {
            (Shape::Rectangle(rectangle), _, Some(corner)) => rectangle.move_corner(corner, point),
            (Shape::Circle(circle), ShapeHandle::Radius, None) => circle.edge = point,
            (Shape::Line(line), ShapeHandle::Start, None) => line.start = point,
            (Shape::Line(line), ShapeHandle::End, None) => line.end = point,
            (Shape::Text(text), ShapeHandle::TextBottomRight, None) => {
                let width = f64::from(point.x) - f64::from(text.x);
                text.set_scale_from_width(width);
            }
            (_, handle, _) => return Err(ToolError::HandleMismatch { kind, handle }),
        }
        Ok(())
    }
}
