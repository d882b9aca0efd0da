use crate::foundation::error::{AminovizError, AminovizResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Pixel dimensions of the drawing surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl SurfaceSize {
    /// Build a size, rejecting zero-area surfaces.
    pub fn new(width: u32, height: u32) -> AminovizResult<Self> {
        if width == 0 || height == 0 {
            return Err(AminovizError::surface(format!(
                "surface must be non-empty, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Size taken from a host bounding box, rounded to whole pixels.
    pub fn from_bounds(bounds: Rect) -> AminovizResult<Self> {
        let w = bounds.width();
        let h = bounds.height();
        if !w.is_finite() || !h.is_finite() {
            return Err(AminovizError::surface("surface bounds are not finite"));
        }
        Self::new(w.round().max(0.0) as u32, h.round().max(0.0) as u32)
    }

    /// Width as `f64`.
    pub fn w(self) -> f64 {
        f64::from(self.width)
    }

    /// Height as `f64`.
    pub fn h(self) -> f64 {
        f64::from(self.height)
    }

    /// Shorter side in pixels.
    pub fn min_side(self) -> f64 {
        self.w().min(self.h())
    }

    /// Center of the surface.
    pub fn center(self) -> Point {
        Point::new(self.w() / 2.0, self.h() / 2.0)
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque color from a `0xRRGGBB` literal.
    pub const fn from_hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
            a: 255,
        }
    }

    /// Same color with alpha set from a `[0, 1]` opacity.
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    /// Alpha as `[0, 1]`.
    pub fn alpha_f64(self) -> f64 {
        f64::from(self.a) / 255.0
    }

    /// `#rrggbb` form (alpha dropped).
    pub fn to_hex_string(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Premultiplied form of this color.
    pub(crate) fn premul(self) -> Rgba8Premul {
        Rgba8Premul::from_straight_rgba(self.r, self.g, self.b, self.a)
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub(crate) struct Rgba8Premul {
    /// Red, premultiplied.
    pub r: u8,
    /// Green, premultiplied.
    pub g: u8,
    /// Blue, premultiplied.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba8Premul {
    /// Premultiply a straight color.
    pub(crate) fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        use crate::foundation::math::mul_div255;

        Self {
            r: mul_div255(r, a),
            g: mul_div255(g, a),
            b: mul_div255(b, a),
            a,
        }
    }

    /// Bytes in `[r, g, b, a]` order.
    pub(crate) fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
