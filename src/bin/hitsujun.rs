use std::{path::PathBuf, time::Duration};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use hitsujun::{
    AnimationOverrides, CanvasId, DirStrokeSource, Driver, JsonMetadataSource, MetadataSource,
    MountOptions, PlayerConfig, StrokeSource,
};

#[derive(Parser, Debug)]
#[command(name = "hitsujun", version, about = "Kanji stroke-order animation")]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Player config JSON.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory of `<codepoint>.svg` stroke files (overrides the config).
    #[arg(long, global = true)]
    svg_dir: Option<PathBuf>,

    /// More logging (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the stroke timing table as JSON.
    Strokes(CharArgs),
    /// Print the state and stroke offsets at a timeline position as JSON.
    Seek(SeekArgs),
    /// Play the animation in real time, logging progress.
    Play(PlayArgs),
    /// Print dictionary metadata.
    Info(InfoArgs),
}

#[derive(Args, Debug)]
struct CharArgs {
    /// The kanji.
    character: char,
}

#[derive(Args, Debug)]
struct SeekArgs {
    /// The kanji.
    character: char,

    /// Position in length units (clamped to the timeline).
    unit: f64,
}

#[derive(Args, Debug)]
struct PlayArgs {
    /// The kanji.
    character: char,

    /// Pause once this many timeline ms have elapsed.
    #[arg(long)]
    pause_at: Option<f64>,

    /// How long to stay paused, in ms.
    #[arg(long, default_value_t = 500)]
    pause_for: u64,

    /// Frame interval in ms.
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,
}

#[derive(Args, Debug)]
struct InfoArgs {
    /// The kanji.
    character: char,

    /// Metadata JSON (overrides the config).
    #[arg(long)]
    metadata: Option<PathBuf>,

    /// Print the raw record as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.common.verbose);
    let cfg = load_config(&cli.common)?;
    match cli.cmd {
        Command::Strokes(args) => cmd_strokes(&cfg, args),
        Command::Seek(args) => cmd_seek(&cfg, args),
        Command::Play(args) => cmd_play(&cfg, args),
        Command::Info(args) => cmd_info(&cfg, args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(common: &CommonArgs) -> anyhow::Result<PlayerConfig> {
    let mut cfg = match &common.config {
        Some(path) => PlayerConfig::from_path(path)?,
        None => PlayerConfig::default(),
    };
    if let Some(dir) = &common.svg_dir {
        cfg.svg_dir = dir.clone();
    }
    Ok(cfg)
}

// Mounted without autoplay: metadata computed, glyph shown fully drawn.
fn mount(cfg: &PlayerConfig, character: char) -> anyhow::Result<Driver> {
    let svg = DirStrokeSource::new(&cfg.svg_dir).fetch_stroke_svg(character)?;
    let mut driver = Driver::new();
    driver.mount(
        CanvasId::MAIN,
        &svg,
        &MountOptions {
            autoplay: false,
            ..cfg.mount_options()
        },
    )?;
    Ok(driver)
}

fn cmd_strokes(cfg: &PlayerConfig, args: CharArgs) -> anyhow::Result<()> {
    let driver = mount(cfg, args.character)?;
    let table = driver
        .state(CanvasId::MAIN)
        .and_then(|s| s.stroke_table())
        .context("stroke table was not computed")?;
    println!("{}", serde_json::to_string_pretty(table)?);
    Ok(())
}

fn cmd_seek(cfg: &PlayerConfig, args: SeekArgs) -> anyhow::Result<()> {
    let mut driver = mount(cfg, args.character)?;
    driver.seek(CanvasId::MAIN, args.unit);
    let snapshot = driver
        .snapshot(CanvasId::MAIN)
        .context("canvas is not registered")?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn cmd_play(cfg: &PlayerConfig, args: PlayArgs) -> anyhow::Result<()> {
    let mut driver = mount(cfg, args.character)?;
    driver.play(CanvasId::MAIN, &AnimationOverrides::from(cfg.animation_options()));

    let frame = Duration::from_millis(args.frame_ms.max(1));
    let mut pause_at = args.pause_at;
    let mut last_revision = 0;
    loop {
        driver.tick_now();
        let state = driver
            .state(CanvasId::MAIN)
            .context("canvas is not registered")?;
        let (animating, position_ms, revision) =
            (state.is_animating(), state.position_ms(), state.revision());
        if revision != last_revision {
            tracing::info!(
                unit = state.current_unit(),
                total_units = state.total_units(),
                finished = state.finished_flags().iter().filter(|f| **f).count(),
                "progress"
            );
            last_revision = revision;
        }

        if animating && pause_at.is_some_and(|at| position_ms >= at) {
            pause_at = None;
            driver.pause(CanvasId::MAIN);
            tracing::info!(position_ms, pause_for = args.pause_for, "paused");
            std::thread::sleep(Duration::from_millis(args.pause_for));
            driver.resume(CanvasId::MAIN);
            continue;
        }
        if !driver.has_pending_callbacks() {
            break;
        }
        std::thread::sleep(frame);
    }

    let snapshot = driver
        .snapshot(CanvasId::MAIN)
        .context("canvas is not registered")?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn cmd_info(cfg: &PlayerConfig, args: InfoArgs) -> anyhow::Result<()> {
    let path = args
        .metadata
        .or_else(|| cfg.metadata_path.clone())
        .context("no metadata file given (use --metadata or metadata_path in the config)")?;
    let source = JsonMetadataSource::from_path(&path)?;
    let meta = source.fetch_metadata(args.character)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&meta)?);
        return Ok(());
    }
    println!("{}", args.character);
    if !meta.meanings.is_empty() {
        println!("  meanings: {}", meta.meanings.join(", "));
    }
    if !meta.on_readings.is_empty() {
        println!("  on:       {}", meta.on_readings.join(", "));
    }
    if !meta.kun_readings.is_empty() {
        println!("  kun:      {}", meta.kun_readings.join(", "));
    }
    for (label, value) in meta.detail_rows() {
        println!("  {:<9} {value}", format!("{}:", label.to_lowercase()));
    }
    Ok(())
}
