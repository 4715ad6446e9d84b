//! Full-redraw render pass over a host-provided 2D surface.

use super::hit_test::control_points;
use super::tools::{Color, ImageBounds, Shape};

pub const SELECTION_OUTLINE_PADDING: f64 = 5.0;
pub const SELECTION_OUTLINE_DASH: [f64; 2] = [6.0, 4.0];
pub const SELECTION_HANDLE_RADIUS: f64 = 6.0;

/// 2D drawing surface supplied by the host UI, sized to the image's natural pixels.
pub trait DrawingSurface {
    /// `false` until the underlying image has loaded and the surface has a size.
    fn is_ready(&self) -> bool;
    fn resize(&mut self, bounds: ImageBounds);
    fn clear(&mut self);
    fn set_stroke(&mut self, color: Color, width: f64);
    fn set_fill(&mut self, color: Color);
    fn set_line_dash(&mut self, pattern: &[f64]);
    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64));
    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn stroke_circle(&mut self, center: (f64, f64), radius: f64);
    fn fill_circle(&mut self, center: (f64, f64), radius: f64);
    fn fill_text(&mut self, text: &str, baseline: (f64, f64), font_px: f64);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionPalette {
    pub outline: Color,
    pub handle_fill: Color,
}

impl Default for SelectionPalette {
    fn default() -> Self {
        Self {
            outline: Color::new(0x24, 0x61, 0xFF),
            handle_fill: Color::new(0x24, 0x61, 0xFF),
        }
    }
}

/// Everything one redraw needs.
#[derive(Debug, Clone, Copy)]
pub struct RenderScene<'a> {
    pub shapes: &'a [Shape],
    pub selected: Option<usize>,
    pub in_progress: Option<&'a Shape>,
    pub palette: SelectionPalette,
}

/// Clears the surface and redraws every shape, the selection decorations and
/// the in-progress drag. Returns `false` without touching an unready surface.
pub fn render_scene(surface: &mut dyn DrawingSurface, scene: &RenderScene<'_>) -> bool {
    if !surface.is_ready() {
        tracing::trace!("render skipped: surface not ready");
        return false;
    }
    surface.clear();
    for shape in scene.shapes {
        draw_shape(surface, shape);
    }
    if let Some(selected) = scene.selected.and_then(|index| scene.shapes.get(index)) {
        draw_selection(surface, selected, scene.palette);
    }
    if let Some(shape) = scene.in_progress {
        draw_shape(surface, shape);
    }
    true
}

fn point(p: crate::geometry::ToolPoint) -> (f64, f64) {
    (f64::from(p.x), f64::from(p.y))
}

pub fn draw_shape(surface: &mut dyn DrawingSurface, shape: &Shape) {
    let style = shape.style();
    surface.set_stroke(style.color, style.stroke_width);
    surface.set_fill(style.color);
    match shape {
        Shape::Line(line) => surface.stroke_line(point(line.start), point(line.end)),
        Shape::Rectangle(rectangle) => {
            let min = rectangle.min_corner();
            surface.stroke_rect(
                f64::from(min.x),
                f64::from(min.y),
                f64::from(rectangle.width()),
                f64::from(rectangle.height()),
            );
        }
        Shape::Circle(circle) => surface.stroke_circle(point(circle.center), circle.radius()),
        Shape::Text(text) => {
            surface.fill_text(&text.content, point(text.anchor()), text.font_size());
        }
    }
}

fn draw_selection(surface: &mut dyn DrawingSurface, shape: &Shape, palette: SelectionPalette) {
    let outline = shape.bounds().expanded(SELECTION_OUTLINE_PADDING);
    surface.set_stroke(palette.outline, 1.0);
    surface.set_line_dash(&SELECTION_OUTLINE_DASH);
    surface.stroke_rect(outline.left, outline.top, outline.width(), outline.height());
    surface.set_line_dash(&[]);

    surface.set_fill(palette.handle_fill);
    for center in control_points(shape) {
        surface.fill_circle(center, SELECTION_HANDLE_RADIUS);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    SetStroke { color: Color, width: f64 },
    SetFill(Color),
    SetLineDash(Vec<f64>),
    Line { from: (f64, f64), to: (f64, f64) },
    Rect { x: f64, y: f64, width: f64, height: f64 },
    Circle { center: (f64, f64), radius: f64 },
    FilledCircle { center: (f64, f64), radius: f64 },
    Text { content: String, baseline: (f64, f64), font_px: f64 },
}

/// Surface that records commands for later replay onto a real backend.
#[derive(Debug, Clone, Default)]
pub struct CommandRecorder {
    bounds: Option<ImageBounds>,
    commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bounds(&self) -> Option<ImageBounds> {
        self.bounds
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl DrawingSurface for CommandRecorder {
    fn is_ready(&self) -> bool {
        self.bounds
            .is_some_and(|bounds| bounds.width > 0 && bounds.height > 0)
    }

    fn resize(&mut self, bounds: ImageBounds) {
        self.bounds = Some(bounds);
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn set_stroke(&mut self, color: Color, width: f64) {
        self.commands.push(DrawCommand::SetStroke { color, width });
    }

    fn set_fill(&mut self, color: Color) {
        self.commands.push(DrawCommand::SetFill(color));
    }

    fn set_line_dash(&mut self, pattern: &[f64]) {
        self.commands.push(DrawCommand::SetLineDash(pattern.to_vec()));
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64)) {
        self.commands.push(DrawCommand::Line { from, to });
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::Rect {
            x,
            y,
            width,
            height,
        });
    }

    fn stroke_circle(&mut self, center: (f64, f64), radius: f64) {
        self.commands.push(DrawCommand::Circle { center, radius });
    }

    fn fill_circle(&mut self, center: (f64, f64), radius: f64) {
        self.commands
            .push(DrawCommand::FilledCircle { center, radius });
    }

    fn fill_text(&mut self, text: &str, baseline: (f64, f64), font_px: f64) {
        self.commands.push(DrawCommand::Text {
            content: text.to_string(),
            baseline,
            font_px,
        });
    }
}
