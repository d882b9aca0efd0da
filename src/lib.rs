//! aminoviz renders protein sequences as animated, interactive 2D diagrams.
//!
//! The pipeline per frame is pure up to the raster step:
//!
//! - Normalize a raw sequence into a [`Sequence`] (with a fixed fallback)
//! - Place every residue with [`position`] for the chosen [`LayoutMode`]
//! - Compile a backend-agnostic [`FrameScene`] with [`compile_scene`]
//! - Rasterize it with a [`RenderBackend`] (CPU via `vello_cpu`)
//!
//! [`Viewer`] ties these together against a [`Host`]: it owns the animation [`Scheduler`],
//! pointer hover state, and every host subscription, and releases them on teardown.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod anim;
pub(crate) mod engine;
pub(crate) mod layout;
pub(crate) mod render;
pub(crate) mod sequence;

pub use crate::foundation::core::{BezPath, Point, Rect, Rgba8, SurfaceSize, Vec2};
pub use crate::foundation::error::{AminovizError, AminovizResult};

pub use crate::anim::scheduler::{FrameClock, FrameRequestId, FrameTick, PlayState, Scheduler};
pub use crate::anim::state::{AnimationState, MAX_SPEED, SPEED_STEP};
pub use crate::engine::config::{DEFAULT_DISPLAY_NAME, ProteinRecord, VizOptions};
pub use crate::engine::viewer::{FrameOutcome, Host, HostEvent, ListenerId, ListenerKind, Viewer};
pub use crate::interact::hit_test::{
    HoverState, TOOLTIP_OFFSET, Tooltip, client_to_surface, hit_test,
};
pub use crate::layout::engine::{LayoutMode, LayoutParams, position, positions};
pub use crate::render::backend::{
    BackendKind, FrameRGBA, RenderBackend, RenderSettings, create_backend,
};
pub use crate::render::cpu::CpuBackend;
pub use crate::render::scene::{
    BASE_NODE_RADIUS, Backbone, BackgroundGradient, FrameScene, LABEL_MAX_FONT_PX,
    LABEL_MIN_RADIUS, Label, NodeGlyph, Outline, SceneInput, Shadow, compile_scene, node_radius,
    pulse,
};
pub use crate::sequence::alphabet::{AminoAcid, Category};
pub use crate::sequence::cache::SequenceCache;
pub use crate::sequence::normalize::{FALLBACK_SEQUENCE, Sequence, UNAVAILABLE_SENTINEL, normalize};
pub use crate::sequence::stats::{ResidueStat, Statistics};
