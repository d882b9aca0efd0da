use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use aminoviz::{
    AnimationState, BackendKind, FrameRGBA, FrameRequestId, Host, LayoutMode,
    ListenerId, ListenerKind, Point, ProteinRecord, Rect, RenderSettings, SceneInput, Sequence,
    SurfaceSize, Tooltip, Viewer, VizOptions, compile_scene, create_backend, hit_test, normalize,
};

#[derive(Parser, Debug)]
#[command(name = "aminoviz", version)]
struct Cli {
    /// Log pipeline activity to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Run the animation loop against a synthetic clock and write numbered PNGs.
    Frames(FramesArgs),
    /// Print the residue composition as JSON.
    Stats(StatsArgs),
    /// Print the tooltip of the node under a point as JSON.
    Hit(HitArgs),
}

#[derive(Parser, Debug)]
struct ViewArgs {
    /// Input protein record JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Options JSON (layout_mode, speed, running).
    #[arg(long)]
    options: Option<PathBuf>,

    /// Override the layout mode.
    #[arg(long)]
    mode: Option<LayoutMode>,

    /// Override the speed multiplier.
    #[arg(long)]
    speed: Option<f64>,

    /// Surface width in pixels.
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Surface height in pixels.
    #[arg(long, default_value_t = 600)]
    height: u32,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    view: ViewArgs,

    /// Animation time in milliseconds.
    #[arg(long, default_value_t = 0.0)]
    time_ms: f64,

    /// Pointer x, for hover highlighting.
    #[arg(long, requires = "hover_y")]
    hover_x: Option<f64>,

    /// Pointer y, for hover highlighting.
    #[arg(long, requires = "hover_x")]
    hover_y: Option<f64>,

    /// Skip letter rendering (no system fonts needed).
    #[arg(long, default_value_t = false)]
    no_labels: bool,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    #[command(flatten)]
    view: ViewArgs,

    /// Number of frames to write.
    #[arg(long, default_value_t = 30)]
    count: u32,

    /// Frames per second of the synthetic clock.
    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Output directory for `frame_0000.png`, `frame_0001.png`, ...
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct StatsArgs {
    /// Input protein record JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct HitArgs {
    #[command(flatten)]
    view: ViewArgs,

    /// Pointer x in surface pixels.
    #[arg(long)]
    x: f64,

    /// Pointer y in surface pixels.
    #[arg(long)]
    y: f64,

    /// Animation time in milliseconds.
    #[arg(long, default_value_t = 0.0)]
    time_ms: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Stats(args) => cmd_stats(args),
        Command::Hit(args) => cmd_hit(args),
    }
}

impl ViewArgs {
    fn load(&self) -> anyhow::Result<(ProteinRecord, VizOptions, SurfaceSize)> {
        let record = ProteinRecord::from_path(&self.in_path)?;
        let mut opts = match &self.options {
            Some(p) => VizOptions::from_path(p)?,
            None => VizOptions::default(),
        };
        if let Some(mode) = self.mode {
            opts.layout_mode = mode;
        }
        if let Some(speed) = self.speed {
            opts.speed = speed;
        }
        opts.validate()?;
        let surface = SurfaceSize::new(self.width, self.height)?;
        Ok((record, opts, surface))
    }
}

fn snapshot(opts: &VizOptions, time_ms: f64) -> anyhow::Result<AnimationState> {
    let mut anim = opts.animation_state()?;
    anim.elapsed_ms = time_ms.max(0.0);
    Ok(anim)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (record, opts, surface) = args.view.load()?;
    let sequence = normalize(record.sequence.as_deref());
    let anim = snapshot(&opts, args.time_ms)?;
    let hovered = match (args.hover_x, args.hover_y) {
        (Some(x), Some(y)) => hit_test(Point::new(x, y), &sequence, surface, &anim, opts.layout_mode),
        _ => None,
    };

    let scene = compile_scene(&SceneInput {
        sequence: &sequence,
        surface,
        anim,
        mode: opts.layout_mode,
        hovered,
    });
    let settings = RenderSettings {
        draw_labels: !args.no_labels,
        ..RenderSettings::default()
    };
    let mut backend = create_backend(BackendKind::Cpu, &settings)?;
    let frame = backend.render_scene(&scene)?;

    write_png(&args.out, &frame)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

/// Host driven by a synthetic clock: at most one frame request, kept until delivered.
struct OfflineHost {
    bounds: Rect,
    next_id: u64,
    pending: Option<FrameRequestId>,
    last_frame: Option<FrameRGBA>,
}

impl aminoviz::FrameClock for OfflineHost {
    fn request_frame(&mut self) -> FrameRequestId {
        self.next_id += 1;
        let id = FrameRequestId(self.next_id);
        self.pending = Some(id);
        id
    }

    fn cancel_frame(&mut self, id: FrameRequestId) {
        if self.pending == Some(id) {
            self.pending = None;
        }
    }
}

impl Host for OfflineHost {
    fn add_listener(&mut self, kind: ListenerKind) -> ListenerId {
        ListenerId(kind as u64)
    }

    fn remove_listener(&mut self, _id: ListenerId) {}

    fn surface_bounds(&self) -> Option<Rect> {
        Some(self.bounds)
    }

    fn present(&mut self, frame: &FrameRGBA) {
        self.last_frame = Some(frame.clone());
    }
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.fps.is_finite() && args.fps > 0.0,
        "fps must be finite and > 0"
    );
    let (record, mut opts, surface) = args.view.load()?;
    opts.running = true;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let host = OfflineHost {
        bounds: Rect::new(0.0, 0.0, surface.w(), surface.h()),
        next_id: 0,
        pending: None,
        last_frame: None,
    };
    let mut viewer = Viewer::new(host, record, opts)?;
    viewer.mount();
    eprintln!("{}", viewer.caption());

    let step_ms = 1000.0 / args.fps;
    for i in 0..args.count {
        let id = viewer
            .host_mut()
            .pending
            .take()
            .context("animation loop stopped requesting frames")?;
        viewer.on_animation_frame(id, f64::from(i) * step_ms);
        let frame = viewer
            .host_mut()
            .last_frame
            .take()
            .with_context(|| format!("frame {i} was not presented"))?;
        write_png(&args.out_dir.join(format!("frame_{i:04}.png")), &frame)?;
    }
    viewer.teardown();

    eprintln!("wrote {} frames to {}", args.count, args.out_dir.display());
    Ok(())
}

fn cmd_stats(args: StatsArgs) -> anyhow::Result<()> {
    let record = ProteinRecord::from_path(&args.in_path)?;
    let sequence = normalize(record.sequence.as_deref());
    let stats = aminoviz::Statistics::from_sequence(&sequence);

    let entries = stats
        .by_count_desc()
        .into_iter()
        .map(|(aa, st)| {
            serde_json::json!({
                "residue": aa.as_char().to_string(),
                "name": aa.name(),
                "category": aa.category(),
                "count": st.count,
                "percentage": st.percentage_label(),
            })
        })
        .collect::<Vec<_>>();
    let out = serde_json::json!({
        "display_name": record.display_name(),
        "length": sequence.len(),
        "fallback": sequence.is_fallback(),
        "distinct": stats.distinct(),
        "entries": entries,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_hit(args: HitArgs) -> anyhow::Result<()> {
    let (record, opts, surface) = args.view.load()?;
    let sequence: Sequence = normalize(record.sequence.as_deref());
    let anim = snapshot(&opts, args.time_ms)?;
    let pointer = Point::new(args.x, args.y);
    let tooltip = hit_test(pointer, &sequence, surface, &anim, opts.layout_mode)
        .and_then(|i| Tooltip::new(&sequence, i, pointer));
    println!("{}", serde_json::to_string_pretty(&tooltip)?);
    Ok(())
}

fn write_png(path: &Path, frame: &FrameRGBA) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        &frame.to_straight_rgba(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}
