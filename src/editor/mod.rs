//! Canvas annotation editor: shape model, hit-testing, pointer interaction and rendering.

pub mod interaction;
pub mod render;
pub mod tools;

pub use interaction::{InteractionController, PointerOutcome};
pub use render::{
    render_scene, CommandRecorder, DrawCommand, DrawingSurface, RenderScene, SelectionPalette,
};
pub use tools::{EditorTools, ResizeGrip, Shape, ShapeHandle, ShapeStyle, ToolError, ToolKind};
