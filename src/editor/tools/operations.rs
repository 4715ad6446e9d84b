use super::*;

impl EditorTools {
    pub fn add_line(&mut self, start: ToolPoint, end: ToolPoint) -> Result<usize, ToolError> {
        if start == end {
            return Err(ToolError::DegenerateShape);
        }
        Ok(self.push(Shape::Line(LineElement::new(start, end, self.style))))
    }

    pub fn add_rectangle(&mut self, start: ToolPoint, end: ToolPoint) -> Result<usize, ToolError> {
        if start == end {
            return Err(ToolError::DegenerateShape);
        }
        Ok(self.push(Shape::Rectangle(RectangleElement::new(
            start, end, self.style,
        ))))
    }

    pub fn add_circle(&mut self, center: ToolPoint, edge: ToolPoint) -> Result<usize, ToolError> {
        if center == edge {
            return Err(ToolError::DegenerateShape);
        }
        Ok(self.push(Shape::Circle(CircleElement::new(center, edge, self.style))))
    }

    pub fn add_text(&mut self, anchor: ToolPoint, content: &str) -> Result<usize, ToolError> {
        if content.trim().is_empty() {
            return Err(ToolError::EmptyText);
        }
        Ok(self.push(Shape::Text(TextElement::new(anchor, content, self.style))))
    }

    /// Appends the shape a completed drag of the active tool describes.
    pub fn add_dragged_shape(
        &mut self,
        start: ToolPoint,
        end: ToolPoint,
    ) -> Result<usize, ToolError> {
        match self.active_tool {
            ToolKind::Line => self.add_line(start, end),
            ToolKind::Rectangle => self.add_rectangle(start, end),
            ToolKind::Circle => self.add_circle(start, end),
            ToolKind::Text => Err(ToolError::NotADragTool(ToolKind::Text)),
        }
    }

    /// Shape the active tool would produce for an in-progress drag, without storing it.
    pub fn preview_shape(&self, start: ToolPoint, current: ToolPoint) -> Option<Shape> {
        match self.active_tool {
            ToolKind::Line => Some(Shape::Line(LineElement::new(start, current, self.style))),
            ToolKind::Rectangle => Some(Shape::Rectangle(RectangleElement::new(
                start, current, self.style,
            ))),
            ToolKind::Circle => Some(Shape::Circle(CircleElement::new(
                start, current, self.style,
            ))),
            ToolKind::Text => None,
        }
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
        self.selected = None;
    }

    /// Removes the oldest `count` shapes; a selection among them is dropped,
    /// a later one follows its shape.
    pub fn remove_leading(&mut self, count: usize) {
        let count = count.min(self.shapes.len());
        self.shapes.drain(..count);
        self.selected = self
            .selected
            .and_then(|index| index.checked_sub(count));
    }

    fn push(&mut self, shape: Shape) -> usize {
        self.shapes.push(shape);
        self.shapes.len() - 1
    }
}
