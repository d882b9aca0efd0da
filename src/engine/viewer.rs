use std::sync::Arc;

use crate::{
    anim::{
        scheduler::{FrameClock, FrameRequestId, FrameTick, PlayState, Scheduler},
        state::AnimationState,
    },
    engine::config::{ProteinRecord, VizOptions},
    foundation::{
        core::{Point, Rect, SurfaceSize},
        error::{AminovizError, AminovizResult},
    },
    interact::hit_test::{HoverState, Tooltip, client_to_surface, hit_test},
    layout::engine::LayoutMode,
    render::{
        backend::{BackendKind, FrameRGBA, RenderBackend, RenderSettings, create_backend},
        scene::{FrameScene, SceneInput, compile_scene},
    },
    sequence::{cache::SequenceCache, normalize::Sequence, stats::Statistics},
};

/// Host event streams a [`Viewer`] subscribes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Pointer moved over the surface.
    PointerMove,
    /// Pointer left the surface.
    PointerLeave,
    /// Surface container changed size.
    Resize,
}

impl ListenerKind {
    /// Every kind, in registration order.
    pub const ALL: [Self; 3] = [Self::PointerMove, Self::PointerLeave, Self::Resize];
}

/// Handle of one registered host listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Event delivered by the host to [`Viewer::handle_event`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostEvent {
    /// Pointer position in client space.
    PointerMove {
        /// Client-space coordinates.
        client: Point,
    },
    /// Pointer left the drawing surface.
    PointerLeave,
    /// The surface must be re-measured.
    Resize,
}

/// Environment a [`Viewer`] runs in: a frame clock, event subscriptions, and a surface.
pub trait Host: FrameClock {
    /// Subscribe to `kind`; events arrive through [`Viewer::handle_event`].
    fn add_listener(&mut self, kind: ListenerKind) -> ListenerId;
    /// Undo one [`Host::add_listener`].
    fn remove_listener(&mut self, id: ListenerId);
    /// Surface rectangle in client space, or `None` while it is not mounted.
    fn surface_bounds(&self) -> Option<Rect>;
    /// Show a finished frame.
    fn present(&mut self, frame: &FrameRGBA);
}

/// What [`Viewer::on_animation_frame`] did with a callback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameOutcome {
    /// A frame was drawn and presented.
    Presented {
        /// Animation time the frame was drawn at.
        elapsed_ms: f64,
    },
    /// The surface was unavailable or could not be drawn; retried on the next frame.
    Skipped,
    /// The callback was stale; nothing happened.
    Ignored,
}

/// One live visualization bound to a host.
///
/// Owns the sequence, statistics, animation and hover state, the render backend, and every host
/// subscription it makes. [`Viewer::teardown`] (also run on drop) releases all of them.
pub struct Viewer<H: Host> {
    host: H,
    backend: Box<dyn RenderBackend>,
    record: ProteinRecord,
    cache: SequenceCache,
    sequence: Arc<Sequence>,
    mode: LayoutMode,
    scheduler: Scheduler,
    hover: HoverState,
    surface: Option<SurfaceSize>,
    listeners: Vec<ListenerId>,
    mounted: bool,
}

impl<H: Host> Viewer<H> {
    /// Create an unmounted viewer with the default CPU backend.
    pub fn new(host: H, record: ProteinRecord, options: VizOptions) -> AminovizResult<Self> {
        let backend = create_backend(BackendKind::Cpu, &RenderSettings::default())?;
        Self::with_backend(host, record, options, backend)
    }

    /// Create an unmounted viewer that draws with `backend`.
    pub fn with_backend(
        host: H,
        record: ProteinRecord,
        options: VizOptions,
        backend: Box<dyn RenderBackend>,
    ) -> AminovizResult<Self> {
        let anim = options.animation_state()?;
        let mut cache = SequenceCache::new();
        let (sequence, _) = cache.sequence_for(record.sequence.as_deref());
        Ok(Self {
            host,
            backend,
            record,
            cache,
            sequence,
            mode: options.layout_mode,
            scheduler: Scheduler::new(anim),
            hover: HoverState::default(),
            surface: None,
            listeners: Vec::new(),
            mounted: false,
        })
    }

    /// Register listeners, measure the surface, and request the first frame. Idempotent.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        for kind in ListenerKind::ALL {
            let id = self.host.add_listener(kind);
            self.listeners.push(id);
        }
        self.surface = self.measure();
        self.scheduler.start(&mut self.host);
        self.mounted = true;
        self.invalidate();
        tracing::debug!(
            residues = self.sequence.len(),
            mode = %self.mode,
            "viewer mounted"
        );
    }

    /// Cancel any pending frame and remove every listener. Idempotent.
    pub fn teardown(&mut self) {
        if !self.mounted {
            return;
        }
        self.scheduler.stop(&mut self.host);
        for id in self.listeners.drain(..) {
            self.host.remove_listener(id);
        }
        self.mounted = false;
        tracing::debug!("viewer torn down");
    }

    /// Whether [`Viewer::mount`] has run without a matching teardown.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Swap the protein. A changed sequence cancels the pending frame and restarts scheduling.
    pub fn set_protein(&mut self, record: ProteinRecord) {
        let (sequence, changed) = self.cache.sequence_for(record.sequence.as_deref());
        self.record = record;
        if !changed || *sequence == *self.sequence {
            self.sequence = sequence;
            return;
        }
        self.sequence = sequence;
        self.hover.clear_index();
        if self.mounted {
            self.scheduler.restart(&mut self.host);
            self.invalidate();
        }
        tracing::debug!(residues = self.sequence.len(), "sequence swapped");
    }

    /// Change the placement algorithm.
    pub fn set_mode(&mut self, mode: LayoutMode) {
        if self.mode != mode {
            self.mode = mode;
            self.invalidate();
        }
    }

    /// Change the speed multiplier; rejected outside `[0, 3]`.
    pub fn set_speed(&mut self, speed: f64) -> AminovizResult<()> {
        self.scheduler.set_speed(speed)
    }

    /// Pause or resume. Hosts wire visibility observers here.
    pub fn set_running(&mut self, running: bool) {
        if self.mounted {
            self.scheduler.set_running(running, &mut self.host);
            self.invalidate();
        } else {
            // Mount issues the real first request.
            self.scheduler.set_running(running, &mut NoClock);
            self.scheduler.cancel(&mut NoClock);
        }
    }

    /// Flip play/pause; returns the new state.
    pub fn toggle(&mut self) -> PlayState {
        self.set_running(!self.scheduler.state().running);
        self.scheduler.play_state()
    }

    /// React to one host event.
    pub fn handle_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::PointerMove { client } => {
                let before = self.hover.index();
                match self
                    .host
                    .surface_bounds()
                    .and_then(|b| SurfaceSize::from_bounds(b).ok().map(|s| (b, s)))
                {
                    Some((bounds, surface)) => {
                        let pointer = client_to_surface(client, bounds);
                        let hit = hit_test(
                            pointer,
                            &self.sequence,
                            surface,
                            &self.scheduler.state(),
                            self.mode,
                        );
                        self.hover.update(pointer, hit);
                    }
                    None => self.hover.clear_index(),
                }
                if self.hover.index() != before {
                    self.invalidate();
                }
            }
            HostEvent::PointerLeave => {
                let before = self.hover.index();
                self.hover.clear();
                if before.is_some() {
                    self.invalidate();
                }
            }
            HostEvent::Resize => {
                self.surface = self.measure();
                self.invalidate();
                tracing::debug!(surface = ?self.surface, "surface resized");
            }
        }
    }

    /// Handle a frame callback for request `id` at host time `timestamp_ms`.
    ///
    /// Draw failures never propagate: the frame is skipped without touching any state and a new
    /// frame is requested while running. While paused the frame is drawn at the frozen time and
    /// nothing further is requested.
    pub fn on_animation_frame(&mut self, id: FrameRequestId, timestamp_ms: f64) -> FrameOutcome {
        if !self.scheduler.is_pending(id) {
            return FrameOutcome::Ignored;
        }
        let Some(surface) = self.measure() else {
            tracing::debug!("surface unavailable; skipping frame");
            self.scheduler.defer(id, &mut self.host);
            return FrameOutcome::Skipped;
        };

        let anim = self.scheduler.preview(timestamp_ms);
        let frame = match self.draw(surface, anim) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!(error = %e, "frame skipped");
                self.scheduler.defer(id, &mut self.host);
                return FrameOutcome::Skipped;
            }
        };

        match self.scheduler.on_frame(id, timestamp_ms, &mut self.host) {
            FrameTick::Advanced { .. } | FrameTick::Idle => {}
            FrameTick::Stale => return FrameOutcome::Ignored,
        }
        self.surface = Some(surface);
        self.host.present(&frame);
        FrameOutcome::Presented {
            elapsed_ms: anim.elapsed_ms,
        }
    }

    /// Draw and present at the committed time, outside the frame clock.
    pub fn redraw(&mut self) -> AminovizResult<FrameRGBA> {
        let surface = self
            .measure()
            .ok_or_else(|| AminovizError::surface("surface is not available"))?;
        let frame = self.draw(surface, self.scheduler.state())?;
        self.surface = Some(surface);
        self.host.present(&frame);
        Ok(frame)
    }

    /// Scene at the committed time for the last measured surface.
    pub fn scene(&self) -> Option<FrameScene> {
        let surface = self.surface?;
        Some(self.compile(surface, self.scheduler.state()))
    }

    /// `"{name} • {n} amino acids"`.
    pub fn caption(&self) -> String {
        format!(
            "{} • {} amino acids",
            self.record.display_name(),
            self.sequence.len()
        )
    }

    /// Composition statistics of the current sequence, computed once per sequence.
    pub fn statistics(&mut self) -> Arc<Statistics> {
        self.cache
            .statistics()
            .unwrap_or_else(|| Arc::new(Statistics::from_sequence(&self.sequence)))
    }

    /// Tooltip for the hovered node.
    pub fn tooltip(&self) -> Option<Tooltip> {
        self.hover.tooltip(&self.sequence)
    }

    /// Current hover state.
    pub fn hover(&self) -> HoverState {
        self.hover
    }

    /// Committed animation state.
    pub fn animation(&self) -> AnimationState {
        self.scheduler.state()
    }

    /// Current play state.
    pub fn play_state(&self) -> PlayState {
        self.scheduler.play_state()
    }

    /// Current placement algorithm.
    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    /// Normalized sequence being shown.
    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    /// Record the sequence came from.
    pub fn record(&self) -> &ProteinRecord {
        &self.record
    }

    /// Last measured surface size.
    pub fn surface(&self) -> Option<SurfaceSize> {
        self.surface
    }

    /// Borrow the host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutably borrow the host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Ask for one frame when the visible state changed; no-op while a frame is pending.
    fn invalidate(&mut self) {
        if self.mounted {
            self.scheduler.request_redraw(&mut self.host);
        }
    }

    fn measure(&self) -> Option<SurfaceSize> {
        self.host
            .surface_bounds()
            .and_then(|b| SurfaceSize::from_bounds(b).ok())
    }

    fn compile(&self, surface: SurfaceSize, anim: AnimationState) -> FrameScene {
        compile_scene(&SceneInput {
            sequence: &self.sequence,
            surface,
            anim,
            mode: self.mode,
            hovered: self.hover.index(),
        })
    }

    fn draw(&mut self, surface: SurfaceSize, anim: AnimationState) -> AminovizResult<FrameRGBA> {
        let scene = self.compile(surface, anim);
        self.backend.render_scene(&scene)
    }
}

impl<H: Host> Drop for Viewer<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Clock used for play-state changes before mount; requests are never delivered.
struct NoClock;

impl FrameClock for NoClock {
    fn request_frame(&mut self) -> FrameRequestId {
        FrameRequestId(0)
    }

    fn cancel_frame(&mut self, _id: FrameRequestId) {}
}

#[cfg(test)]
#[path = "../../tests/unit/engine/viewer.rs"]
mod tests;
