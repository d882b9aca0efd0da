use std::{collections::HashMap, sync::Arc};

use kurbo::Shape;

use crate::{
    foundation::{
        core::{Affine, BezPath, Point, Rgba8},
        error::{AminovizError, AminovizResult},
    },
    render::{
        backend::{FrameRGBA, RenderBackend, RenderSettings},
        label::{LabelCache, LabelRaster},
        scene::{FrameScene, NodeGlyph},
        sprites::{
            SPRITE_PX, bake_background, bake_highlight, bake_shadow, shadow_ratio_from_key,
            shadow_ratio_key,
        },
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct ShadowKey {
    ratio: u32,
    color: [u8; 4],
}

struct CpuSurface {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

/// CPU raster backend powered by `vello_cpu`.
///
/// Gradients and soft edges are baked into image paints once and reused across frames; only
/// the geometry changes per frame.
pub struct CpuBackend {
    settings: RenderSettings,
    ctx: Option<vello_cpu::RenderContext>,
    surface: Option<CpuSurface>,

    background: Option<((u32, u32), vello_cpu::Image)>,
    highlight: HashMap<u8, vello_cpu::Image>,
    shadows: HashMap<ShadowKey, vello_cpu::Image>,
    labels: Option<LabelCache>,
    label_images: HashMap<usize, (Arc<Vec<u8>>, vello_cpu::Image)>,
}

impl CpuBackend {
    /// Create a backend; nothing is allocated until the first frame.
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            ctx: None,
            surface: None,
            background: None,
            highlight: HashMap::new(),
            shadows: HashMap::new(),
            labels: None,
            label_images: HashMap::new(),
        }
    }

    fn ensure_surface(&mut self, width: u32, height: u32) -> AminovizResult<(u16, u16)> {
        let w: u16 = width
            .try_into()
            .map_err(|_| AminovizError::render("surface width exceeds u16"))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| AminovizError::render("surface height exceeds u16"))?;

        let stale = self
            .surface
            .as_ref()
            .is_none_or(|s| s.width != w || s.height != h);
        if stale {
            tracing::debug!(width, height, "allocating cpu surface");
            self.surface = Some(CpuSurface {
                width: w,
                height: h,
                pixmap: vello_cpu::Pixmap::new(w, h),
            });
            self.ctx = None;
        }
        Ok((w, h))
    }

    fn background_paint(&mut self, scene: &FrameScene) -> AminovizResult<vello_cpu::Image> {
        let key = (scene.surface.width, scene.surface.height);
        if let Some((k, img)) = &self.background
            && *k == key
        {
            return Ok(img.clone());
        }
        let bytes = bake_background(&scene.background, key.0, key.1);
        let img = rgba_premul_to_image(&bytes, key.0, key.1)?;
        self.background = Some((key, img.clone()));
        Ok(img)
    }

    fn highlight_paint(&mut self, alpha: f64) -> AminovizResult<vello_cpu::Image> {
        let key = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        if let Some(img) = self.highlight.get(&key).cloned() {
            return Ok(img);
        }
        let bytes = bake_highlight(SPRITE_PX, f64::from(key) / 255.0);
        let img = rgba_premul_to_image(&bytes, SPRITE_PX, SPRITE_PX)?;
        self.highlight.insert(key, img.clone());
        Ok(img)
    }

    fn shadow_paint(&mut self, core_ratio: f64, color: Rgba8) -> AminovizResult<vello_cpu::Image> {
        let key = ShadowKey {
            ratio: shadow_ratio_key(core_ratio),
            color: [color.r, color.g, color.b, color.a],
        };
        if let Some(img) = self.shadows.get(&key).cloned() {
            return Ok(img);
        }
        let bytes = bake_shadow(SPRITE_PX, shadow_ratio_from_key(key.ratio), color);
        let img = rgba_premul_to_image(&bytes, SPRITE_PX, SPRITE_PX)?;
        self.shadows.insert(key, img.clone());
        Ok(img)
    }

    fn label_paint(&mut self, glyph: &NodeGlyph) -> AminovizResult<Option<(vello_cpu::Image, u32)>> {
        let Some(label) = glyph.label else {
            return Ok(None);
        };
        if !self.settings.draw_labels {
            return Ok(None);
        }
        let capacity = self.settings.label_cache_capacity;
        let cache = self.labels.get_or_insert_with(|| LabelCache::new(capacity));
        let LabelRaster {
            width,
            height,
            data,
        } = cache.get(&label)?;

        // Keyed by buffer identity; the held `Arc` keeps the address from being reused.
        let id = Arc::as_ptr(&data) as usize;
        if let Some((_, img)) = self.label_images.get(&id) {
            return Ok(Some((img.clone(), width)));
        }
        let img = rgba_premul_to_image(&data, width, height)?;
        if self.label_images.len() >= capacity {
            self.label_images.clear();
        }
        self.label_images.insert(id, (data, img.clone()));
        Ok(Some((img, width)))
    }

    fn draw_node(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        glyph: &NodeGlyph,
    ) -> AminovizResult<()> {
        let r = glyph.radius;
        if !(r.is_finite() && r > 0.0) {
            return Ok(());
        }
        let c = glyph.center;

        let extent = r + glyph.shadow.blur;
        let shadow = self.shadow_paint(r / extent, glyph.shadow.color)?;
        draw_sprite(ctx, shadow, c + glyph.shadow.offset, extent);

        let disk = kurbo::Circle::new(c, r).to_path(0.1);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(color_to_cpu(glyph.fill));
        ctx.fill_path(&bezpath_to_cpu(&disk));

        if let Some(outline) = glyph.outline {
            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(outline.width));
            ctx.set_paint(color_to_cpu(outline.color));
            ctx.stroke_path(&bezpath_to_cpu(&disk));
        }

        let highlight = self.highlight_paint(glyph.highlight_alpha)?;
        draw_sprite(ctx, highlight, c, r);

        if let Some((img, side)) = self.label_paint(glyph)? {
            let half = f64::from(side) / 2.0;
            ctx.set_transform(affine_to_cpu(Affine::translate((c.x - half, c.y - half))));
            ctx.set_paint(img);
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(side),
                f64::from(side),
            ));
        }
        Ok(())
    }
}

impl RenderBackend for CpuBackend {
    #[tracing::instrument(level = "debug", skip(self, scene), fields(nodes = scene.nodes.len()))]
    fn render_scene(&mut self, scene: &FrameScene) -> AminovizResult<FrameRGBA> {
        let (w, h) = self.ensure_surface(scene.surface.width, scene.surface.height)?;

        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        let bg = self.background_paint(scene)?;
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(bg);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(w),
            f64::from(h),
        ));

        if scene.nodes.len() > 1 {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(scene.backbone.width));
            ctx.set_paint(color_to_cpu(scene.backbone.color));
            ctx.stroke_path(&bezpath_to_cpu(&scene.backbone.path));
        }

        for glyph in &scene.nodes {
            self.draw_node(&mut ctx, glyph)?;
        }

        ctx.flush();
        let surface = self
            .surface
            .as_mut()
            .ok_or_else(|| AminovizError::render("cpu surface was not initialized"))?;
        ctx.render_to_pixmap(&mut surface.pixmap);
        let mut data = surface.pixmap.data_as_u8_slice().to_vec();
        if scene.background.is_opaque() {
            // u8 compositing of sprites can round coverage down to 254.
            for px in data.chunks_exact_mut(4) {
                px[3] = 255;
            }
        }
        self.ctx = Some(ctx);

        Ok(FrameRGBA {
            width: scene.surface.width,
            height: scene.surface.height,
            data,
            premultiplied: true,
        })
    }
}

/// Draws a square sprite image of half-width `half` centered on `center`.
fn draw_sprite(ctx: &mut vello_cpu::RenderContext, img: vello_cpu::Image, center: Point, half: f64) {
    let scale = (2.0 * half) / f64::from(SPRITE_PX);
    let tr = Affine::translate((center.x - half, center.y - half)) * Affine::scale(scale);
    ctx.set_transform(affine_to_cpu(tr));
    ctx.set_paint(img);
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(SPRITE_PX),
        f64::from(SPRITE_PX),
    ));
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> AminovizResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| AminovizError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| AminovizError::render("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(AminovizError::render("pixmap byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true))
}

fn rgba_premul_to_image(
    bytes_premul: &[u8],
    width: u32,
    height: u32,
) -> AminovizResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(bytes_premul, width, height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
