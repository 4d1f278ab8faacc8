use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "testcard", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render a whole scene to MP4 (requires `ffmpeg` on PATH) or a PNG directory.
    Render(RenderArgs),
    /// List the built-in scene names.
    Scenes,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct SceneSource {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Built-in scene name (see `testcard scenes`).
    #[arg(long)]
    scene: Option<String>,
}

#[derive(Args, Debug)]
struct CanvasArgs {
    /// Raster scale relative to the reference resolution.
    #[arg(long)]
    preview_scale: Option<f64>,

    /// TTF/OTF font for numerals and counters.
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    source: SceneSource,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    canvas: CanvasArgs,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    source: SceneSource,

    /// Output path: `*.mp4` encodes with ffmpeg, anything else is a PNG directory.
    #[arg(long)]
    out: PathBuf,

    /// Colour that translucent pixels are flattened over (hex or colour name).
    #[arg(long, default_value = "black")]
    background: testcard::Colour,

    /// Fail instead of replacing an existing MP4.
    #[arg(long)]
    no_overwrite: bool,

    #[command(flatten)]
    canvas: CanvasArgs,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Scenes => {
            for name in testcard::SceneSpec::PRESETS {
                println!("{name}");
            }
            Ok(())
        }
    }
}

fn read_scene_json(path: &Path) -> anyhow::Result<testcard::SceneSpec> {
    let f = File::open(path).with_context(|| format!("open scene '{}'", path.display()))?;
    let r = BufReader::new(f);
    let spec: testcard::SceneSpec =
        serde_json::from_reader(r).with_context(|| "parse scene JSON")?;
    Ok(spec)
}

fn load_spec(source: &SceneSource, canvas: &CanvasArgs) -> anyhow::Result<testcard::SceneSpec> {
    let mut spec = match (&source.in_path, &source.scene) {
        (Some(path), _) => read_scene_json(path)?,
        (None, Some(name)) => testcard::SceneSpec::preset(name)
            .with_context(|| format!("unknown scene '{name}' (try `testcard scenes`)"))?,
        (None, None) => anyhow::bail!("either --in or --scene is required"),
    };
    if let Some(scale) = canvas.preview_scale {
        spec.scale = scale;
    }
    if let Some(font) = &canvas.font {
        spec.font = Some(font.clone());
    }
    spec.validate()?;
    Ok(spec)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let spec = load_spec(&args.source, &args.canvas)?;
    let mut canvas = spec.canvas()?;

    testcard::compose_frame(&spec, &mut canvas, testcard::FrameIndex(args.frame))?;
    let frame = testcard::Surface::snapshot(&mut canvas)?;
    testcard::encode::write_png(&frame, &args.out)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let spec = load_spec(&args.source, &args.canvas)?;
    let mut canvas = spec.canvas()?;

    let is_mp4 = args
        .out
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("mp4"));
    let bg = args.background.with_alpha(0xff).to_rgba8();
    let mut sink: Box<dyn testcard::FrameSink> = if is_mp4 {
        Box::new(
            testcard::FfmpegSink::new(&args.out)
                .with_background(bg)
                .with_overwrite(!args.no_overwrite),
        )
    } else {
        Box::new(testcard::PngSequenceSink::new(&args.out).with_background(bg))
    };

    let stats = testcard::render_scene(&spec, &mut canvas, sink.as_mut())?;

    eprintln!(
        "wrote {} ({} frames, {} composed)",
        args.out.display(),
        stats.frames_written,
        stats.frames_composed
    );
    Ok(())
}
