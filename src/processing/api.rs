use serde::Deserialize;
use thiserror::Error;

use crate::editor::tools::{Shape, ToolKind};

/// Bearer token issued by the authentication provider.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn token(&self) -> &str {
        &self.0
    }

    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Stored image a session edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub id: u64,
    pub filename: String,
}

impl ImageRef {
    pub fn new(id: u64, filename: impl Into<String>) -> Self {
        Self {
            id,
            filename: filename.into(),
        }
    }
}

/// One entry of the user's image list, most recent first.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageRecord {
    pub id: u64,
    pub filename: String,
    #[serde(default)]
    pub original_filename: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub uploaded_at: Option<String>,
}

impl From<&ImageRecord> for ImageRef {
    fn from(record: &ImageRecord) -> Self {
        Self::new(record.id, record.filename.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShapeGeometry {
    Segment { end_x: i32, end_y: i32 },
    Circle { radius: i64 },
    Text { content: String, font_size: f64 },
}

/// Remote draw request for a single shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyShapeCommand {
    pub shape_type: ToolKind,
    pub start_x: i32,
    pub start_y: i32,
    pub geometry: ShapeGeometry,
    pub color: (u8, u8, u8),
    pub thickness: f64,
    pub create_copy: bool,
}

impl ApplyShapeCommand {
    pub fn from_shape(shape: &Shape, create_copy: bool) -> Self {
        let style = shape.style();
        let (start, geometry) = match shape {
            Shape::Line(line) => (
                line.start,
                ShapeGeometry::Segment {
                    end_x: line.end.x,
                    end_y: line.end.y,
                },
            ),
            Shape::Rectangle(rectangle) => (
                rectangle.start,
                ShapeGeometry::Segment {
                    end_x: rectangle.end.x,
                    end_y: rectangle.end.y,
                },
            ),
            Shape::Circle(circle) => (
                circle.center,
                ShapeGeometry::Circle {
                    radius: circle.radius().round() as i64,
                },
            ),
            Shape::Text(text) => (
                text.anchor(),
                ShapeGeometry::Text {
                    content: text.content.clone(),
                    font_size: text.font_scale,
                },
            ),
        };
        Self {
            shape_type: shape.kind(),
            start_x: start.x,
            start_y: start.y,
            geometry,
            color: style.color.rgb(),
            thickness: style.stroke_width,
            create_copy,
        }
    }

    /// Query parameters in the order the draw endpoint documents them.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let (r, g, b) = self.color;
        let mut pairs = vec![
            ("shape_type", self.shape_type.wire_name().to_string()),
            ("start_x", self.start_x.to_string()),
            ("start_y", self.start_y.to_string()),
            ("color_r", r.to_string()),
            ("color_g", g.to_string()),
            ("color_b", b.to_string()),
            ("thickness", self.thickness.to_string()),
        ];
        match &self.geometry {
            ShapeGeometry::Segment { end_x, end_y } => {
                pairs.push(("end_x", end_x.to_string()));
                pairs.push(("end_y", end_y.to_string()));
            }
            ShapeGeometry::Circle { radius } => pairs.push(("radius", radius.to_string())),
            ShapeGeometry::Text { content, font_size } => {
                pairs.push(("text", content.clone()));
                pairs.push(("font_size", font_size.to_string()));
            }
        }
        pairs.push(("create_copy", self.create_copy.to_string()));
        pairs
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApplyResponse {
    pub processed_filename: String,
    #[serde(default)]
    pub image_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("credential rejected by the image service")]
    Unauthorized,
    #[error("image service rejected the request ({status}): {detail}")]
    Rejected { status: u16, detail: String },
    #[error("image service unreachable: {0}")]
    Transport(String),
    #[error("unexpected response from image service: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Message fit for the user; server detail when it sent one.
    pub fn detail(&self) -> String {
        match self {
            Self::Rejected { detail, .. } => detail.clone(),
            other => other.to_string(),
        }
    }
}

/// Remote image-processing service.
pub trait ImageApi: Send + Sync {
    fn apply_shape(
        &self,
        credential: &Credential,
        image_id: u64,
        command: &ApplyShapeCommand,
    ) -> Result<ApplyResponse, ApiError>;

    fn list_images(&self, credential: &Credential) -> Result<Vec<ImageRecord>, ApiError>;
}
