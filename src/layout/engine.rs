use std::f64::consts::PI;

use crate::foundation::core::{Point, SurfaceSize};

/// Placement algorithm for residues on the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Archimedean-like spiral growing outward with index, rotating over time.
    #[default]
    Spiral,
    /// Fixed-radius ring rotating over time.
    Circular,
    /// Static, centered row-major grid.
    Linear,
    /// Horizontal sine wave travelling over time.
    Wave,
}

impl LayoutMode {
    /// All modes, in selector order.
    pub const ALL: [LayoutMode; 4] = [
        LayoutMode::Spiral,
        LayoutMode::Circular,
        LayoutMode::Linear,
        LayoutMode::Wave,
    ];

    /// Lower-case name, as used in options files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Spiral => "spiral",
            Self::Circular => "circular",
            Self::Linear => "linear",
            Self::Wave => "wave",
        }
    }

    /// Whether positions depend on time.
    pub fn is_animated(self) -> bool {
        !matches!(self, Self::Linear)
    }
}

impl std::str::FromStr for LayoutMode {
    type Err = crate::AminovizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| crate::AminovizError::validation(format!("unknown layout mode '{s}'")))
    }
}

impl std::fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Explicit inputs shared by every residue of one layout pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutParams {
    /// Surface the layout is centered in.
    pub surface: SurfaceSize,
    /// Animation time in milliseconds.
    pub time_ms: f64,
    /// Placement algorithm.
    pub mode: LayoutMode,
    /// Speed multiplier applied to every time term.
    pub speed: f64,
}

/// Position of residue `index` out of `total`.
///
/// Pure: identical arguments always produce bit-identical output. `total == 0` yields the
/// surface center.
pub fn position(index: usize, total: usize, params: &LayoutParams) -> Point {
    let LayoutParams {
        surface,
        time_ms,
        mode,
        speed,
    } = *params;
    let (w, h) = (surface.w(), surface.h());
    let center = surface.center();
    if total == 0 {
        return center;
    }
    let frac = (index as f64) / (total as f64);

    match mode {
        LayoutMode::Spiral => {
            let angle = frac * PI * 8.0 + time_ms * 0.001 * speed;
            let radius = 50.0 + frac * surface.min_side() * 0.3;
            polar(center, angle, radius)
        }
        LayoutMode::Circular => {
            let angle = frac * PI * 2.0 + time_ms * 0.002 * speed;
            let radius = surface.min_side() * 0.35;
            polar(center, angle, radius)
        }
        LayoutMode::Linear => {
            let cols = (total as f64).sqrt().ceil().max(1.0) as usize;
            let rows = total.div_ceil(cols);
            let spacing = (w / cols as f64).min(h / cols as f64) * 0.8;
            let start_x = (w - (cols as f64 - 1.0) * spacing) / 2.0;
            let start_y = (h - (rows as f64 - 1.0) * spacing) / 2.0;
            Point::new(
                start_x + ((index % cols) as f64) * spacing,
                start_y + ((index / cols) as f64) * spacing,
            )
        }
        LayoutMode::Wave => {
            let x = frac * w;
            let y = center.y + (frac * PI * 4.0 + time_ms * 0.003 * speed).sin() * 100.0;
            Point::new(x, y)
        }
    }
}

/// Positions of every residue in draw order.
pub fn positions(total: usize, params: &LayoutParams) -> Vec<Point> {
    (0..total).map(|i| position(i, total, params)).collect()
}

fn polar(center: Point, angle: f64, radius: f64) -> Point {
    Point::new(
        center.x + angle.cos() * radius,
        center.y + angle.sin() * radius,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/layout/engine.rs"]
mod tests;
