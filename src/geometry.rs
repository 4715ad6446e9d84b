//! Shared geometric and color primitives used across editor and processing modules.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToolPoint {
    pub x: i32,
    pub y: i32,
}

impl ToolPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: ToolPoint) -> f64 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        dx.hypot(dy)
    }

    pub const fn offset(self, delta_x: i32, delta_y: i32) -> Self {
        Self {
            x: self.x.saturating_add(delta_x),
            y: self.y.saturating_add(delta_y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageBounds {
    pub width: u32,
    pub height: u32,
}

impl ImageBounds {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("color must be #RRGGBB, got {0:?}")]
    InvalidHex(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn rgb(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    pub fn from_hex(value: &str) -> Result<Self, ColorParseError> {
        let digits = value.strip_prefix('#').unwrap_or(value);
        let invalid = || ColorParseError::InvalidHex(value.to_string());
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Maps display-space pointer positions onto the surface's pixel grid.
///
/// The surface is sized to the image's natural dimensions, so the result is
/// an image-space coordinate regardless of how the surface is scaled on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceMapping {
    pub origin_x: f64,
    pub origin_y: f64,
    pub displayed_width: f64,
    pub displayed_height: f64,
    pub surface_width: u32,
    pub surface_height: u32,
}

impl SurfaceMapping {
    pub const fn new(
        origin: (f64, f64),
        displayed: (f64, f64),
        surface: ImageBounds,
    ) -> Self {
        Self {
            origin_x: origin.0,
            origin_y: origin.1,
            displayed_width: displayed.0,
            displayed_height: displayed.1,
            surface_width: surface.width,
            surface_height: surface.height,
        }
    }

    pub fn to_image_point(&self, pointer_x: f64, pointer_y: f64) -> Option<ToolPoint> {
        if self.displayed_width <= 0.0 || self.displayed_height <= 0.0 {
            return None;
        }
        let scale_x = f64::from(self.surface_width) / self.displayed_width;
        let scale_y = f64::from(self.surface_height) / self.displayed_height;
        let x = ((pointer_x - self.origin_x) * scale_x).round() as i32;
        let y = ((pointer_y - self.origin_y) * scale_y).round() as i32;
        Some(ToolPoint::new(x, y))
    }
}
