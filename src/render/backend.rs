use crate::{
    foundation::{error::AminovizResult, math::unpremultiply_rgba8},
    render::scene::FrameScene,
};

/// A rendered frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha** by default. The `premultiplied` flag is included to make
/// this explicit at API boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Straight-alpha bytes, suitable for PNG encoding.
    pub fn to_straight_rgba(&self) -> Vec<u8> {
        if self.premultiplied {
            unpremultiply_rgba8(&self.data)
        } else {
            self.data.clone()
        }
    }
}

/// A renderer that rasterizes a compiled [`FrameScene`] into a [`FrameRGBA`].
pub trait RenderBackend {
    /// Rasterize one frame.
    fn render_scene(&mut self, scene: &FrameScene) -> AminovizResult<FrameRGBA>;
}

/// Available backend kinds.
///
/// - `Cpu` is always available.
#[derive(Clone, Copy, Debug, Default)]
pub enum BackendKind {
    /// CPU raster backend powered by `vello_cpu`.
    #[default]
    Cpu,
}

/// Backend-agnostic settings.
#[derive(Clone, Debug)]
pub struct RenderSettings {
    /// Whether node letters are rasterized. Disabling skips font loading entirely.
    pub draw_labels: bool,
    /// Maximum number of cached label rasters.
    pub label_cache_capacity: usize,
}

impl Default for RenderSettings {
    fn default() -> Self {
        let label_cache_capacity = std::env::var("AMINOVIZ_LABEL_CACHE_CAPACITY")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(256);
        Self {
            draw_labels: true,
            label_cache_capacity,
        }
    }
}

/// Create a rendering backend implementation.
pub fn create_backend(
    kind: BackendKind,
    settings: &RenderSettings,
) -> AminovizResult<Box<dyn RenderBackend>> {
    match kind {
        BackendKind::Cpu => Ok(Box::new(crate::render::cpu::CpuBackend::new(
            settings.clone(),
        ))),
    }
}
