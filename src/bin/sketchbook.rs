use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sketchbook::{
    BuiltinSketch, Canvas, CaterpillarRace, Flappy, Font, Garden, ImageHandle, ManualClock,
    Runner, Sketch, SketchConfig,
};

#[derive(Parser, Debug)]
#[command(name = "sketchbook", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the built-in sketches.
    List,
    /// Run a sketch headless and write frames as PNGs.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Sketch to run (see `list`).
    #[arg(long)]
    sketch: BuiltinSketch,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 60)]
    frames: u64,

    /// Output directory for `frame_NNNNN.png` files.
    #[arg(long)]
    out: PathBuf,

    /// Optional JSON config (size, frame rate, seed, font, image).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write every K-th frame only.
    #[arg(long, default_value_t = 1)]
    every: u64,

    /// Click the canvas center before this frame (repeatable).
    #[arg(long = "click-at")]
    click_at: Vec<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::List => cmd_list(),
        Command::Render(args) => cmd_render(args),
    }
}

fn cmd_list() -> anyhow::Result<()> {
    for sketch in BuiltinSketch::ALL {
        println!("{:<12} {}", sketch.name(), sketch.description());
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<SketchConfig> {
    let mut cfg = match path {
        Some(p) => SketchConfig::from_path(p)?,
        None => SketchConfig::default(),
    };
    cfg.apply_env_overrides();
    cfg.validate()?;
    Ok(cfg)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let font = cfg
        .font
        .as_ref()
        .map(Font::from_path)
        .transpose()
        .context("load font from config")?;

    match args.sketch {
        BuiltinSketch::Garden => {
            let mut garden = Garden::new();
            if let Some(font) = font {
                garden = garden.with_font(font);
            }
            if let Some(path) = &cfg.image {
                let handle = ImageHandle::load(path);
                // Block on the decode so the first frame already has the picture.
                if let Err(e) = handle.wait() {
                    tracing::warn!(error = %e, "garden image unavailable");
                }
                garden = garden.with_picture(handle);
            }
            render_frames(garden, &cfg, &args)
        }
        BuiltinSketch::Flappy => {
            let mut flappy = Flappy::new();
            if let Some(font) = font {
                flappy = flappy.with_font(font);
            }
            render_frames(flappy, &cfg, &args)
        }
        BuiltinSketch::Caterpillar => {
            let mut race = CaterpillarRace::default();
            if let Some(font) = font {
                race = race.with_font(font);
            }
            render_frames(race, &cfg, &args)
        }
    }
}

#[tracing::instrument(skip(sketch, cfg, args), fields(sketch = %args.sketch, frames = args.frames))]
fn render_frames<A: Sketch>(sketch: A, cfg: &SketchConfig, args: &RenderArgs) -> anyhow::Result<()> {
    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;

    let canvas = Canvas::cpu(cfg.size())?;
    let mut runner =
        Runner::new(sketch, canvas, ManualClock::new(), cfg.frame_rate)?.with_seed(cfg.seed);
    runner.start()?;

    let every = args.every.max(1);
    let (cx, cy) = (f64::from(cfg.width) / 2.0, f64::from(cfg.height) / 2.0);
    let mut written = 0u64;
    for i in 0..args.frames {
        if args.click_at.contains(&i) {
            runner.pointer_clicked(cx, cy)?;
        }
        if runner.run_for(1)? == 0 && runner.frames().is_stopped() {
            break;
        }
        if i % every != 0 {
            continue;
        }
        let frame = runner.snapshot()?;
        let path = args.out.join(format!("frame_{i:05}.png"));
        frame.save_png(&path)?;
        written += 1;
    }

    eprintln!("wrote {written} frames to {}", args.out.display());
    Ok(())
}
