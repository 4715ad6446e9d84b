use super::*;

impl EditorTools {
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_shape(&self) -> Option<&Shape> {
        self.selected.and_then(|index| self.shapes.get(index))
    }

    pub fn active_tool(&self) -> ToolKind {
        self.active_tool
    }

    pub fn style(&self) -> ShapeStyle {
        self.style
    }
}
