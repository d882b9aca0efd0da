//! Pixel baking for paints that `vello_cpu` draws as images: the background gradient, the glossy
//! node highlight, and soft node shadows. All outputs are premultiplied RGBA8, row-major.

use crate::{foundation::core::Rgba8, render::scene::BackgroundGradient};

/// Edge length of the square highlight and shadow sprites.
pub(crate) const SPRITE_PX: u32 = 128;

/// Steps used to quantize the shadow core ratio for caching.
pub(crate) const SHADOW_RATIO_STEPS: u32 = 64;

/// Diagonal gradient over a `w x h` surface, projected onto the top-left to bottom-right axis.
pub(crate) fn bake_background(gradient: &BackgroundGradient, w: u32, h: u32) -> Vec<u8> {
    let mut bytes = vec![0u8; (w as usize).saturating_mul(h as usize).saturating_mul(4)];
    let (wf, hf) = (f64::from(w), f64::from(h));
    let denom = (wf * wf + hf * hf).max(1e-9);
    for y in 0..h {
        let py = f64::from(y) + 0.5;
        for x in 0..w {
            let px = f64::from(x) + 0.5;
            let t = (px * wf + py * hf) / denom;
            let c = gradient.sample(t).premul().to_array();
            let idx = ((y as usize) * (w as usize) + (x as usize)) * 4;
            bytes[idx..idx + 4].copy_from_slice(&c);
        }
    }
    bytes
}

/// Gradient parameter of a two-point conical gradient on the unit disk.
///
/// The inner circle has radius 0 at `focus`, the outer circle radius 1 at the origin. Returns
/// `None` outside the outer circle.
pub(crate) fn conical_t(p: (f64, f64), focus: (f64, f64)) -> Option<f64> {
    let d = (p.0 - focus.0, p.1 - focus.1);
    let a = focus.0 * focus.0 + focus.1 * focus.1 - 1.0;
    let b = 2.0 * (d.0 * focus.0 + d.1 * focus.1);
    let c = d.0 * d.0 + d.1 * d.1;
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 || a >= 0.0 {
        return None;
    }
    let t = (-b - disc.sqrt()) / (2.0 * a);
    const EPS: f64 = 1e-9;
    (-EPS..=1.0 + EPS)
        .contains(&t)
        .then(|| t.clamp(0.0, 1.0))
}

/// White glossy highlight: `alpha` at the focus (up-left of center) fading to 0 at the rim.
pub(crate) fn bake_highlight(size: u32, alpha: f64) -> Vec<u8> {
    let focus = (-1.0 / 3.0, -1.0 / 3.0);
    bake_square(size, |u, v| {
        let a = conical_t((u, v), focus).map_or(0.0, |t| alpha * (1.0 - t));
        Rgba8::from_hex(0xffffff).with_alpha(a)
    })
}

/// Soft disk: full `color` inside `core_ratio` of the sprite radius, fading to 0 at the edge.
pub(crate) fn bake_shadow(size: u32, core_ratio: f64, color: Rgba8) -> Vec<u8> {
    let k = core_ratio.clamp(0.0, 1.0);
    let soft = (1.0 - k).max(1e-6);
    let base = color.alpha_f64();
    bake_square(size, |u, v| {
        let d = (u * u + v * v).sqrt();
        let t = ((d - (k - soft)) / (2.0 * soft)).clamp(0.0, 1.0);
        let fall = 1.0 - t * t * (3.0 - 2.0 * t);
        color.with_alpha(base * fall)
    })
}

pub(crate) fn shadow_ratio_key(core_ratio: f64) -> u32 {
    (core_ratio.clamp(0.0, 1.0) * f64::from(SHADOW_RATIO_STEPS)).round() as u32
}

pub(crate) fn shadow_ratio_from_key(key: u32) -> f64 {
    f64::from(key) / f64::from(SHADOW_RATIO_STEPS)
}

fn bake_square(size: u32, mut shade: impl FnMut(f64, f64) -> Rgba8) -> Vec<u8> {
    let n = size as usize;
    let mut bytes = vec![0u8; n * n * 4];
    let s = f64::from(size);
    for y in 0..size {
        let v = ((f64::from(y) + 0.5) / s) * 2.0 - 1.0;
        for x in 0..size {
            let u = ((f64::from(x) + 0.5) / s) * 2.0 - 1.0;
            let idx = ((y as usize) * n + (x as usize)) * 4;
            bytes[idx..idx + 4].copy_from_slice(&shade(u, v).premul().to_array());
        }
    }
    bytes
}

#[cfg(test)]
#[path = "../../tests/unit/render/sprites.rs"]
mod tests;
