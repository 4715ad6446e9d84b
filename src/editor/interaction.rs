//! Pointer-driven authoring and manipulation of the shape list.

use super::hit_test::{find_topmost_shape_at, handle_at, HANDLE_HIT_RADIUS};
use super::render::{render_scene, DrawingSurface, RenderScene, SelectionPalette};
use super::tools::{EditorTools, ResizeGrip, Shape, ShapeStyle, ToolKind, ToolPoint};
use crate::geometry::SurfaceMapping;
use crate::state::{EditorMode, GestureEvent, GestureMachine, GestureState};

/// What the host must do after feeding an event to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    Unchanged,
    Redraw,
    /// Ask the user for text content, then call
    /// [`InteractionController::submit_text`].
    RequestText { anchor: ToolPoint },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragState {
    Draw { start: ToolPoint, current: ToolPoint },
    Move { index: usize, offset: (i32, i32) },
    Resize { index: usize, grip: ResizeGrip },
}

#[derive(Debug, Default)]
pub struct InteractionController {
    tools: EditorTools,
    mode: EditorMode,
    gesture: GestureMachine,
    mapping: Option<SurfaceMapping>,
    drag: Option<DragState>,
    pending_text: Option<ToolPoint>,
    palette: SelectionPalette,
}

impl InteractionController {
    pub fn new(style: ShapeStyle) -> Self {
        Self {
            tools: EditorTools::with_style(style),
            ..Self::default()
        }
    }

    pub fn tools(&self) -> &EditorTools {
        &self.tools
    }

    pub fn shapes(&self) -> &[Shape] {
        self.tools.shapes()
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn gesture_state(&self) -> GestureState {
        self.gesture.state()
    }

    pub fn pending_text_anchor(&self) -> Option<ToolPoint> {
        self.pending_text
    }

    pub fn set_surface_mapping(&mut self, mapping: SurfaceMapping) {
        self.mapping = Some(mapping);
    }

    pub fn set_palette(&mut self, palette: SelectionPalette) {
        self.palette = palette;
    }

    pub fn set_style(&mut self, style: ShapeStyle) {
        self.tools.set_style(style);
    }

    /// Picks a drawing tool; the next gestures author shapes of this kind.
    pub fn select_tool(&mut self, tool: ToolKind) -> PointerOutcome {
        self.tools.select_tool(tool);
        self.pending_text = None;
        self.set_mode(EditorMode::Draw)
    }

    pub fn set_mode(&mut self, mode: EditorMode) -> PointerOutcome {
        self.mode = mode;
        if mode == EditorMode::Draw && self.tools.selected().is_some() {
            self.tools.clear_selection();
            return PointerOutcome::Redraw;
        }
        PointerOutcome::Unchanged
    }

    pub fn clear_canvas(&mut self) -> PointerOutcome {
        self.tools.clear();
        self.end_gesture(GestureEvent::Reset);
        self.pending_text = None;
        tracing::debug!("canvas cleared");
        PointerOutcome::Redraw
    }

    /// Drops the first `count` shapes, which a partially failed commit already
    /// applied to the image.
    pub fn discard_applied(&mut self, count: usize) -> PointerOutcome {
        if count == 0 {
            return PointerOutcome::Unchanged;
        }
        self.tools.remove_leading(count);
        self.end_gesture(GestureEvent::Reset);
        tracing::debug!(count, remaining = self.tools.len(), "applied shapes discarded");
        PointerOutcome::Redraw
    }

    /// Withdraws an outstanding text request; a later `submit_text` adds nothing.
    pub fn cancel_text_request(&mut self) -> bool {
        self.pending_text.take().is_some()
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) -> PointerOutcome {
        let Some(point) = self.map_pointer(x, y) else {
            return PointerOutcome::Unchanged;
        };
        if self.pending_text.take().is_some() {
            tracing::debug!("pending text request abandoned by new pointer-down");
        }
        if self.gesture.state().is_active() {
            tracing::debug!(state = ?self.gesture.state(), "pointer-down during gesture; resetting");
            self.end_gesture(GestureEvent::Reset);
        }

        match self.mode {
            EditorMode::Interact => self.begin_interaction(point),
            EditorMode::Draw if !self.tools.active_tool().is_drag_tool() => {
                self.pending_text = Some(point);
                PointerOutcome::RequestText { anchor: point }
            }
            EditorMode::Draw => {
                self.begin_gesture(
                    GestureEvent::BeginDraw,
                    DragState::Draw {
                        start: point,
                        current: point,
                    },
                );
                PointerOutcome::Redraw
            }
        }
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> PointerOutcome {
        let Some(point) = self.map_pointer(x, y) else {
            return PointerOutcome::Unchanged;
        };
        let Some(drag) = self.drag.as_mut() else {
            return PointerOutcome::Unchanged;
        };

        let result = match *drag {
            DragState::Draw { ref mut current, .. } => {
                *current = point;
                Ok(())
            }
            DragState::Move { index, offset } => self
                .tools
                .move_shape_to(index, point.offset(-offset.0, -offset.1)),
            DragState::Resize { index, grip } => self.tools.resize_shape(index, grip, point),
        };
        if let Err(err) = result {
            tracing::warn!(?err, "drag update rejected");
            return PointerOutcome::Unchanged;
        }
        PointerOutcome::Redraw
    }

    /// Pointer released over the surface; the release position counts as the last move.
    pub fn pointer_up(&mut self, x: f64, y: f64) -> PointerOutcome {
        let moved = self.pointer_move(x, y);
        match self.finish_gesture() {
            PointerOutcome::Unchanged => moved,
            outcome => outcome,
        }
    }

    /// Pointer left the surface or the gesture was cancelled by the platform.
    pub fn pointer_leave(&mut self) -> PointerOutcome {
        self.finish_gesture()
    }

    /// Resolves an outstanding [`PointerOutcome::RequestText`]. `None` or blank
    /// content cancels the request without adding a shape.
    pub fn submit_text(&mut self, content: Option<&str>) -> PointerOutcome {
        let Some(anchor) = self.pending_text.take() else {
            return PointerOutcome::Unchanged;
        };
        let Some(content) = content else {
            return PointerOutcome::Unchanged;
        };
        match self.tools.add_text(anchor, content) {
            Ok(index) => {
                self.adopt_new_shape(index);
                PointerOutcome::Redraw
            }
            Err(err) => {
                tracing::debug!(?err, "text input discarded");
                PointerOutcome::Unchanged
            }
        }
    }

    /// Shape the current drag would create, for previewing only.
    pub fn in_progress_shape(&self) -> Option<Shape> {
        match self.drag {
            Some(DragState::Draw { start, current }) => self.tools.preview_shape(start, current),
            _ => None,
        }
    }

    pub fn render(&self, surface: &mut dyn DrawingSurface) -> bool {
        let in_progress = self.in_progress_shape();
        render_scene(
            surface,
            &RenderScene {
                shapes: self.tools.shapes(),
                selected: self.tools.selected(),
                in_progress: in_progress.as_ref(),
                palette: self.palette,
            },
        )
    }

    fn map_pointer(&self, x: f64, y: f64) -> Option<ToolPoint> {
        self.mapping.and_then(|mapping| mapping.to_image_point(x, y))
    }

    fn begin_interaction(&mut self, point: ToolPoint) -> PointerOutcome {
        if let Some(index) = self.tools.selected() {
            let grip = self
                .tools
                .shape(index)
                .and_then(|shape| handle_at(point, shape, HANDLE_HIT_RADIUS))
                .and_then(|handle| self.tools.grip(index, handle).ok());
            if let Some(grip) = grip {
                self.begin_gesture(GestureEvent::BeginResize, DragState::Resize { index, grip });
                return PointerOutcome::Redraw;
            }
        }

        let Some(index) = find_topmost_shape_at(point, self.tools.shapes()) else {
            if self.tools.selected().is_none() {
                return PointerOutcome::Unchanged;
            }
            self.tools.clear_selection();
            return PointerOutcome::Redraw;
        };
        let Some(reference) = self.tools.shape(index).map(Shape::reference_point) else {
            return PointerOutcome::Unchanged;
        };
        if let Err(err) = self.tools.select(Some(index)) {
            tracing::warn!(?err, "hit-tested shape could not be selected");
            return PointerOutcome::Unchanged;
        }
        let offset = (point.x - reference.x, point.y - reference.y);
        self.begin_gesture(GestureEvent::BeginMove, DragState::Move { index, offset });
        PointerOutcome::Redraw
    }

    fn begin_gesture(&mut self, event: GestureEvent, drag: DragState) {
        match self.gesture.transition(event) {
            Ok(_) => self.drag = Some(drag),
            Err(err) => tracing::warn!(?err, "gesture not started"),
        }
    }

    fn finish_gesture(&mut self) -> PointerOutcome {
        let Some(drag) = self.drag else {
            return PointerOutcome::Unchanged;
        };
        if let DragState::Draw { start, current } = drag {
            match self.tools.add_dragged_shape(start, current) {
                Ok(index) => self.adopt_new_shape(index),
                Err(err) => tracing::debug!(?err, "drag produced no shape"),
            }
        }
        self.end_gesture(GestureEvent::Release);
        PointerOutcome::Redraw
    }

    fn end_gesture(&mut self, event: GestureEvent) {
        self.drag = None;
        if let Err(err) = self.gesture.transition(event) {
            tracing::debug!(?err, "gesture already idle");
        }
    }

    fn adopt_new_shape(&mut self, index: usize) {
        if let Err(err) = self.tools.select(Some(index)) {
            tracing::warn!(?err, "new shape could not be selected");
            return;
        }
        self.mode = EditorMode::Interact;
        tracing::debug!(
            index,
            kind = ?self.tools.shape(index).map(Shape::kind),
            "shape added"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::render::CommandRecorder;
    use crate::editor::tools::{ImageBounds, TEXT_MAX_FONT_SCALE, TEXT_MIN_FONT_SCALE};

    fn controller() -> InteractionController {
        let mut controller = InteractionController::new(ShapeStyle::default());
        controller.set_surface_mapping(SurfaceMapping::new(
            (0.0, 0.0),
            (400.0, 300.0),
            ImageBounds::new(400, 300),
        ));
        controller
    }

    fn drag(controller: &mut InteractionController, from: (f64, f64), to: (f64, f64)) {
        controller.pointer_down(from.0, from.1);
        controller.pointer_move(to.0, to.1);
        controller.pointer_up(to.0, to.1);
    }

    #[test]
    fn click_without_drag_creates_nothing() {
        let mut controller = controller();
        controller.select_tool(ToolKind::Rectangle);
        controller.pointer_down(20.0, 20.0);
        controller.pointer_up(20.0, 20.0);

        assert!(controller.shapes().is_empty());
        assert_eq!(controller.mode(), EditorMode::Draw);
        assert_eq!(controller.gesture_state(), GestureState::Idle);
    }

    #[test]
    fn completed_drag_selects_new_shape_and_switches_to_interact() {
        let mut controller = controller();
        controller.select_tool(ToolKind::Line);
        drag(&mut controller, (10.0, 10.0), (60.0, 10.0));

        assert_eq!(controller.shapes().len(), 1);
        assert_eq!(controller.tools().selected(), Some(0));
        assert_eq!(controller.mode(), EditorMode::Interact);
        assert_eq!(controller.gesture_state(), GestureState::Idle);
    }

    #[test]
    fn pointer_is_mapped_into_image_space() {
        let mut controller = InteractionController::new(ShapeStyle::default());
        controller.set_surface_mapping(SurfaceMapping::new(
            (100.0, 50.0),
            (200.0, 150.0),
            ImageBounds::new(400, 300),
        ));
        controller.select_tool(ToolKind::Rectangle);
        drag(&mut controller, (110.0, 60.0), (150.0, 90.0));

        let Some(Shape::Rectangle(rectangle)) = controller.shapes().first() else {
            panic!("rectangle expected");
        };
        assert_eq!(rectangle.start, ToolPoint::new(20, 20));
        assert_eq!(rectangle.end, ToolPoint::new(100, 80));
    }

    #[test]
    fn events_before_layout_are_ignored() {
        let mut controller = InteractionController::new(ShapeStyle::default());
        assert_eq!(controller.pointer_down(5.0, 5.0), PointerOutcome::Unchanged);
        assert_eq!(controller.gesture_state(), GestureState::Idle);
    }

    #[test]
    fn interact_click_selects_topmost_and_empty_click_clears() {
        let mut controller = controller();
        controller.select_tool(ToolKind::Rectangle);
        drag(&mut controller, (0.0, 0.0), (40.0, 40.0));
        controller.select_tool(ToolKind::Rectangle);
        drag(&mut controller, (20.0, 20.0), (60.0, 60.0));

        controller.pointer_down(30.0, 30.0);
        controller.pointer_up(30.0, 30.0);
        assert_eq!(controller.tools().selected(), Some(1));

        controller.pointer_down(5.0, 5.0);
        controller.pointer_up(5.0, 5.0);
        assert_eq!(controller.tools().selected(), Some(0));

        controller.pointer_down(200.0, 200.0);
        controller.pointer_up(200.0, 200.0);
        assert_eq!(controller.tools().selected(), None);
        assert_eq!(controller.mode(), EditorMode::Interact);
    }

    #[test]
    fn dragging_a_body_moves_it_keeping_the_grab_offset() {
        let mut controller = controller();
        controller.select_tool(ToolKind::Rectangle);
        drag(&mut controller, (10.0, 10.0), (50.0, 40.0));

        controller.pointer_down(30.0, 25.0);
        assert_eq!(controller.gesture_state(), GestureState::Moving);
        controller.pointer_move(40.0, 35.0);
        controller.pointer_up(40.0, 35.0);

        let Some(Shape::Rectangle(rectangle)) = controller.shapes().first() else {
            panic!("rectangle expected");
        };
        assert_eq!(rectangle.start, ToolPoint::new(20, 20));
        assert_eq!(rectangle.end, ToolPoint::new(60, 50));
        assert_eq!(controller.tools().selected(), Some(0));
        assert_eq!(controller.gesture_state(), GestureState::Idle);
    }

    #[test]
    fn handle_of_selected_shape_takes_precedence_over_body_hits() {
        let mut controller = controller();
        controller.select_tool(ToolKind::Rectangle);
        drag(&mut controller, (10.0, 10.0), (50.0, 40.0));
        controller.select_tool(ToolKind::Rectangle);
        drag(&mut controller, (45.0, 35.0), (90.0, 90.0));
        controller.set_mode(EditorMode::Interact);
        controller.pointer_down(20.0, 20.0);
        controller.pointer_up(20.0, 20.0);
        assert_eq!(controller.tools().selected(), Some(0));

        // (50, 40) is inside shape 1 but is also shape 0's bottom-right handle.
        controller.pointer_down(50.0, 40.0);
        assert_eq!(controller.gesture_state(), GestureState::Resizing);
        controller.pointer_move(70.0, 60.0);
        controller.pointer_up(70.0, 60.0);

        let Some(Shape::Rectangle(rectangle)) = controller.shapes().first() else {
            panic!("rectangle expected");
        };
        assert_eq!(rectangle.max_corner(), ToolPoint::new(70, 60));
        assert_eq!(rectangle.min_corner(), ToolPoint::new(10, 10));
        assert_eq!(controller.tools().selected(), Some(0));
    }

    #[test]
    fn corner_dragged_across_the_opposite_edge_and_back_keeps_that_edge() {
        let mut controller = controller();
        controller.select_tool(ToolKind::Rectangle);
        drag(&mut controller, (10.0, 10.0), (50.0, 40.0));

        controller.pointer_down(10.0, 10.0);
        assert_eq!(controller.gesture_state(), GestureState::Resizing);
        controller.pointer_move(60.0, 10.0);
        controller.pointer_move(65.0, 10.0);
        controller.pointer_up(20.0, 10.0);

        let Some(Shape::Rectangle(rectangle)) = controller.shapes().first() else {
            panic!("rectangle expected");
        };
        assert_eq!(rectangle.min_corner(), ToolPoint::new(20, 10));
        assert_eq!(rectangle.max_corner(), ToolPoint::new(50, 40));
    }

    #[test]
    fn text_tool_requests_input_and_appends_on_submit() {
        let mut controller = controller();
        controller.select_tool(ToolKind::Text);
        assert_eq!(
            controller.pointer_down(30.0, 40.0),
            PointerOutcome::RequestText {
                anchor: ToolPoint::new(30, 40)
            }
        );
        assert_eq!(controller.gesture_state(), GestureState::Idle);
        assert_eq!(controller.submit_text(Some("label")), PointerOutcome::Redraw);

        assert_eq!(controller.shapes().len(), 1);
        assert_eq!(controller.tools().selected(), Some(0));
        assert_eq!(controller.mode(), EditorMode::Interact);
        assert_eq!(controller.pending_text_anchor(), None);
    }

    #[test]
    fn cancelled_or_blank_text_adds_nothing() {
        let mut controller = controller();
        controller.select_tool(ToolKind::Text);
        controller.pointer_down(30.0, 40.0);
        assert_eq!(controller.submit_text(None), PointerOutcome::Unchanged);
        controller.pointer_down(30.0, 40.0);
        assert_eq!(controller.submit_text(Some("  ")), PointerOutcome::Unchanged);
        assert_eq!(controller.submit_text(Some("late")), PointerOutcome::Unchanged);
        assert!(controller.shapes().is_empty());
        assert_eq!(controller.mode(), EditorMode::Draw);
    }

    #[test]
    fn cancelled_text_request_ignores_the_late_answer() {
        let mut controller = controller();
        controller.select_tool(ToolKind::Text);
        controller.pointer_down(30.0, 40.0);

        assert!(controller.cancel_text_request());
        assert!(!controller.cancel_text_request());
        assert_eq!(controller.submit_text(Some("late")), PointerOutcome::Unchanged);
        assert!(controller.shapes().is_empty());
    }

    #[test]
    fn discarding_applied_shapes_keeps_the_rest_in_order() {
        let mut controller = controller();
        for y in [10.0, 20.0, 30.0] {
            controller.select_tool(ToolKind::Line);
            drag(&mut controller, (0.0, y), (50.0, y));
        }
        assert_eq!(controller.tools().selected(), Some(2));

        assert_eq!(controller.discard_applied(2), PointerOutcome::Redraw);
        let Some(Shape::Line(line)) = controller.shapes().first() else {
            panic!("line expected");
        };
        assert_eq!(controller.shapes().len(), 1);
        assert_eq!(line.start, ToolPoint::new(0, 30));
        assert_eq!(controller.tools().selected(), Some(0));
        assert_eq!(controller.discard_applied(0), PointerOutcome::Unchanged);
    }

    #[test]
    fn text_handle_drag_clamps_font_scale() {
        let mut controller = controller();
        controller.select_tool(ToolKind::Text);
        controller.pointer_down(100.0, 100.0);
        controller.submit_text(Some("ab"));

        // scale 2: handle at (100 + 24, 100)
        controller.pointer_down(124.0, 100.0);
        assert_eq!(controller.gesture_state(), GestureState::Resizing);
        controller.pointer_up(390.0, 100.0);
        let Some(Shape::Text(text)) = controller.shapes().first() else {
            panic!("text expected");
        };
        assert_eq!(text.font_scale, TEXT_MAX_FONT_SCALE);

        // scale 5: handle at (100 + 60, 100)
        controller.pointer_down(160.0, 100.0);
        controller.pointer_up(90.0, 100.0);
        let Some(Shape::Text(text)) = controller.shapes().first() else {
            panic!("text expected");
        };
        assert_eq!(text.font_scale, TEXT_MIN_FONT_SCALE);
    }

    #[test]
    fn choosing_a_tool_clears_selection() {
        let mut controller = controller();
        controller.select_tool(ToolKind::Circle);
        drag(&mut controller, (50.0, 50.0), (60.0, 50.0));
        assert_eq!(controller.tools().selected(), Some(0));

        assert_eq!(controller.select_tool(ToolKind::Line), PointerOutcome::Redraw);
        assert_eq!(controller.tools().selected(), None);
        assert_eq!(controller.mode(), EditorMode::Draw);
    }

    #[test]
    fn pointer_leave_commits_the_drawn_shape() {
        let mut controller = controller();
        controller.select_tool(ToolKind::Circle);
        controller.pointer_down(50.0, 50.0);
        controller.pointer_move(58.0, 56.0);
        controller.pointer_leave();

        let Some(Shape::Circle(circle)) = controller.shapes().first() else {
            panic!("circle expected");
        };
        assert_eq!(circle.radius(), 10.0);
    }

    #[test]
    fn clear_canvas_resets_shapes_selection_and_gesture() {
        let mut controller = controller();
        controller.select_tool(ToolKind::Line);
        drag(&mut controller, (0.0, 0.0), (30.0, 30.0));
        controller.select_tool(ToolKind::Line);
        controller.pointer_down(5.0, 5.0);
        controller.pointer_move(25.0, 5.0);

        controller.clear_canvas();
        assert!(controller.shapes().is_empty());
        assert_eq!(controller.tools().selected(), None);
        assert_eq!(controller.gesture_state(), GestureState::Idle);
        assert_eq!(controller.in_progress_shape(), None);
    }

    #[test]
    fn drawing_renders_the_in_progress_shape_without_storing_it() {
        let mut controller = controller();
        let mut recorder = CommandRecorder::new();
        recorder.resize(ImageBounds::new(400, 300));
        controller.select_tool(ToolKind::Line);
        controller.pointer_down(0.0, 0.0);
        controller.pointer_move(30.0, 40.0);

        assert!(controller.render(&mut recorder));
        assert!(controller.shapes().is_empty());
        assert!(matches!(
            controller.in_progress_shape(),
            Some(Shape::Line(line)) if line.end == ToolPoint::new(30, 40)
        ));
    }
}
