use crate::{
    anim::state::AnimationState,
    foundation::core::{BezPath, Point, Rgba8, SurfaceSize, Vec2},
    layout::engine::{LayoutMode, LayoutParams, positions},
    sequence::{
        alphabet::{AminoAcid, Category},
        normalize::Sequence,
    },
};

/// Radius of a size-1.0 residue at pulse 1.
pub const BASE_NODE_RADIUS: f64 = 8.0;
/// Nodes with a larger radius always show their letter.
pub const LABEL_MIN_RADIUS: f64 = 10.0;
/// Largest label font size in pixels.
pub const LABEL_MAX_FONT_PX: f64 = 14.0;

const FILL_ALPHA: f64 = 0.8;
const HOVER_FILL_ALPHA: f64 = 1.0;
const SHADOW_BLUR_PX: f64 = 5.0;
const HOVER_SHADOW_BLUR_PX: f64 = 15.0;
const OUTLINE_WIDTH_PX: f64 = 2.0;
const DARK_INK: Rgba8 = Rgba8::from_hex(0x333333);

/// Pulse factor of residue `index` at `time_ms`; `1.0` while paused.
pub fn pulse(index: usize, anim: &AnimationState) -> f64 {
    if !anim.running {
        return 1.0;
    }
    1.0 + 0.2 * (anim.elapsed_ms * 0.01 * anim.speed + (index as f64) * 0.1).sin()
}

/// Current node radius of a residue, shared by the scene compiler and the hit tester.
pub fn node_radius(residue: AminoAcid, index: usize, anim: &AnimationState) -> f64 {
    BASE_NODE_RADIUS * residue.size() * pulse(index, anim)
}

/// Everything a frame depends on. Nothing else is read while compiling.
#[derive(Clone, Copy, Debug)]
pub struct SceneInput<'a> {
    /// Residues in draw order.
    pub sequence: &'a Sequence,
    /// Drawing surface dimensions.
    pub surface: SurfaceSize,
    /// Playback state; `elapsed_ms` is the frame time.
    pub anim: AnimationState,
    /// Placement algorithm.
    pub mode: LayoutMode,
    /// Index highlighted by the pointer, if any.
    pub hovered: Option<usize>,
}

impl SceneInput<'_> {
    /// Layout parameters at this frame's time.
    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams {
            surface: self.surface,
            time_ms: self.anim.elapsed_ms,
            mode: self.mode,
            speed: self.anim.speed,
        }
    }
}

/// Diagonal linear gradient from the top-left to the bottom-right corner.
#[derive(Clone, Debug, PartialEq)]
pub struct BackgroundGradient {
    /// `(offset, color)` stops with offsets in `[0, 1]`, ascending.
    pub stops: Vec<(f64, Rgba8)>,
}

impl Default for BackgroundGradient {
    fn default() -> Self {
        Self {
            stops: vec![
                (0.0, Rgba8::from_hex(0x0f0f23)),
                (0.5, Rgba8::from_hex(0x1a1a3a)),
                (1.0, Rgba8::from_hex(0x0f0f23)),
            ],
        }
    }
}

impl BackgroundGradient {
    /// Whether every stop is fully opaque, so the composited frame is too.
    pub fn is_opaque(&self) -> bool {
        !self.stops.is_empty() && self.stops.iter().all(|(_, c)| c.a == 255)
    }

    /// Color at gradient parameter `t`, clamped to the end stops.
    pub fn sample(&self, t: f64) -> Rgba8 {
        let t = t.clamp(0.0, 1.0);
        let Some(&(_, first)) = self.stops.first() else {
            return Rgba8::from_hex(0x000000);
        };
        let mut prev = (0.0, first);
        for &(off, color) in &self.stops {
            if t <= off {
                let span = off - prev.0;
                let k = if span <= 0.0 { 1.0 } else { (t - prev.0) / span };
                return lerp_rgba(prev.1, color, k);
            }
            prev = (off, color);
        }
        prev.1
    }
}

fn lerp_rgba(a: Rgba8, b: Rgba8, t: f64) -> Rgba8 {
    let lerp = |x: u8, y: u8| -> u8 {
        let xf = f64::from(x);
        let yf = f64::from(y);
        (xf + (yf - xf) * t).round().clamp(0.0, 255.0) as u8
    };
    Rgba8 {
        r: lerp(a.r, b.r),
        g: lerp(a.g, b.g),
        b: lerp(a.b, b.b),
        a: lerp(a.a, b.a),
    }
}

/// Connective polyline through every node center in sequence order.
#[derive(Clone, Debug)]
pub struct Backbone {
    /// Polyline path.
    pub path: BezPath,
    /// Stroke color.
    pub color: Rgba8,
    /// Stroke width in pixels.
    pub width: f64,
}

/// Soft drop shadow under a node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    /// Shadow color.
    pub color: Rgba8,
    /// Offset from the node center.
    pub offset: Vec2,
    /// Blur extent in pixels beyond the node radius.
    pub blur: f64,
}

/// Letter drawn centered in a node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Label {
    /// One-letter code.
    pub letter: char,
    /// Bold font size in pixels.
    pub font_px: f64,
    /// Text color.
    pub color: Rgba8,
}

/// Contrasting ring stroked around a node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Outline {
    /// Stroke color.
    pub color: Rgba8,
    /// Stroke width in pixels.
    pub width: f64,
}

/// One residue as drawn in a single frame.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeGlyph {
    /// Index in the sequence (draw order).
    pub index: usize,
    /// The residue.
    pub residue: AminoAcid,
    /// Node center.
    pub center: Point,
    /// Node radius including pulse.
    pub radius: f64,
    /// Pulse factor used for `radius`.
    pub pulse: f64,
    /// Fill color with alpha.
    pub fill: Rgba8,
    /// Whether the pointer is over this node.
    pub hovered: bool,
    /// Drop shadow; larger when hovered.
    pub shadow: Shadow,
    /// Opacity of the glossy radial highlight at its focus.
    pub highlight_alpha: f64,
    /// Outline for the special category.
    pub outline: Option<Outline>,
    /// Letter, when hovered or large enough to be legible.
    pub label: Option<Label>,
}

/// Backend-agnostic description of one frame, in paint order.
#[derive(Clone, Debug)]
pub struct FrameScene {
    /// Surface dimensions.
    pub surface: SurfaceSize,
    /// Time the scene was compiled at.
    pub time_ms: f64,
    /// Background fill.
    pub background: BackgroundGradient,
    /// Connective path, drawn under the nodes.
    pub backbone: Backbone,
    /// Node glyphs in draw order.
    pub nodes: Vec<NodeGlyph>,
}

impl FrameScene {
    /// Node centers in draw order.
    pub fn centers(&self) -> impl Iterator<Item = Point> + '_ {
        self.nodes.iter().map(|n| n.center)
    }
}

/// Compile one frame from its inputs. Pure.
#[tracing::instrument(level = "trace", skip(input), fields(n = input.sequence.len(), mode = %input.mode))]
pub fn compile_scene(input: &SceneInput<'_>) -> FrameScene {
    let params = input.layout_params();
    let residues = input.sequence.residues();
    let centers = positions(residues.len(), &params);

    let mut path = BezPath::new();
    for (i, &c) in centers.iter().enumerate() {
        if i == 0 {
            path.move_to(c);
        } else {
            path.line_to(c);
        }
    }

    let nodes = residues
        .iter()
        .zip(&centers)
        .enumerate()
        .map(|(index, (&residue, &center))| node_glyph(index, residue, center, input))
        .collect();

    FrameScene {
        surface: input.surface,
        time_ms: input.anim.elapsed_ms,
        background: BackgroundGradient::default(),
        backbone: Backbone {
            path,
            color: Rgba8::from_hex(0xffffff).with_alpha(0.1),
            width: 1.0,
        },
        nodes,
    }
}

fn node_glyph(index: usize, residue: AminoAcid, center: Point, input: &SceneInput<'_>) -> NodeGlyph {
    let pulse = pulse(index, &input.anim);
    let radius = node_radius(residue, index, &input.anim);
    let hovered = input.hovered == Some(index);
    let special = residue.category() == Category::Special;

    let fill = residue
        .color()
        .with_alpha(if hovered { HOVER_FILL_ALPHA } else { FILL_ALPHA });

    let label = (hovered || radius > LABEL_MIN_RADIUS).then(|| Label {
        letter: residue.as_char(),
        font_px: (radius * 0.8).min(LABEL_MAX_FONT_PX),
        color: if special {
            DARK_INK
        } else {
            Rgba8::from_hex(0xffffff)
        },
    });

    NodeGlyph {
        index,
        residue,
        center,
        radius,
        pulse,
        fill,
        hovered,
        shadow: Shadow {
            color: Rgba8::from_hex(0x000000).with_alpha(0.3),
            offset: Vec2::new(2.0, 2.0),
            blur: if hovered {
                HOVER_SHADOW_BLUR_PX
            } else {
                SHADOW_BLUR_PX
            },
        },
        highlight_alpha: 0.4,
        outline: special.then_some(Outline {
            color: DARK_INK,
            width: OUTLINE_WIDTH_PX,
        }),
        label,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/scene.rs"]
mod tests;
