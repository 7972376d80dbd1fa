use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use scrollreel::host::headless::{HeadlessHost, HeadlessOpts};

#[derive(Parser, Debug)]
#[command(name = "scrollreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode every frame of the sequence and report failures as JSON.
    Check(CheckArgs),
    /// Render the hero at one scroll progress value as a PNG.
    Frame(FrameArgs),
    /// Sweep the scroll range and write a PNG for every frame change.
    Scrub(ScrubArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Animator config JSON; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory the frame locator resolves against.
    #[arg(long, default_value = ".")]
    root: PathBuf,
}

#[derive(Args, Debug)]
struct HostArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Force the reduced-motion path (otherwise read from SCROLLREEL_REDUCED_MOTION).
    #[arg(long)]
    reduced_motion: bool,

    /// Fetch worker threads.
    #[arg(long)]
    threads: Option<usize>,

    /// Seconds to wait for the sequence to load.
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    #[command(flatten)]
    source: SourceArgs,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    host: HostArgs,

    /// Pin progress in [0, 1].
    #[arg(long, default_value_t = 0.0)]
    progress: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ScrubArgs {
    #[command(flatten)]
    host: HostArgs,

    /// Number of scroll positions sampled across the pin.
    #[arg(long, default_value_t = 100)]
    steps: u32,

    /// Output directory for PNGs.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(serde::Serialize)]
struct FailedFrame {
    index: u32,
    path: PathBuf,
    error: String,
}

#[derive(serde::Serialize)]
struct CheckReport {
    frame_count: u32,
    loaded: u32,
    failed: Vec<FailedFrame>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Scrub(args) => cmd_scrub(args),
    }
}

fn read_config(path: Option<&Path>) -> anyhow::Result<scrollreel::AnimatorConfig> {
    Ok(match path {
        Some(p) => scrollreel::AnimatorConfig::from_path(p)?,
        None => scrollreel::AnimatorConfig::default(),
    })
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let cfg = read_config(args.source.config.as_deref())?;
    let root = args.source.root.as_path();

    let failed: Vec<FailedFrame> = (0..cfg.frame_count)
        .into_par_iter()
        .filter_map(|i| {
            let path = cfg.locator.resolve(root, scrollreel::FrameIndex(i));
            scrollreel::decode_image_file(&path)
                .err()
                .map(|e| FailedFrame {
                    index: i,
                    path,
                    error: format!("{e:#}"),
                })
        })
        .collect();

    let report = CheckReport {
        frame_count: cfg.frame_count,
        loaded: cfg.frame_count - failed.len() as u32,
        failed,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    if !report.failed.is_empty() {
        anyhow::bail!(
            "{} of {} frames failed to load",
            report.failed.len(),
            report.frame_count
        );
    }
    Ok(())
}

fn start_host(args: &HostArgs) -> anyhow::Result<(HeadlessHost, scrollreel::AnimatorConfig)> {
    let cfg = read_config(args.source.config.as_deref())?;
    let mut host = HeadlessHost::new(
        cfg.clone(),
        HeadlessOpts {
            root: args.source.root.clone(),
            viewport: scrollreel::Viewport::new(args.width, args.height),
            pin_start_px: 0.0,
            threads: args.threads,
        },
    )?;

    let mode = if args.reduced_motion {
        host.start(&true)?
    } else {
        host.start(&scrollreel::EnvMotionPreference::default())?
    };
    host.wait_until_ready(Duration::from_secs(args.timeout_secs))
        .context("load hero frames")?;
    tracing::info!(?mode, "hero ready");
    Ok((host, cfg))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    if !args.progress.is_finite() {
        anyhow::bail!("--progress must be finite");
    }
    let (mut host, cfg) = start_host(&args.host)?;

    host.scroll_to(args.progress.clamp(0.0, 1.0) * cfg.pin.scroll_distance_px);
    host.settle(1.0 / 60.0, 10_000)?;

    let animator = host.animator();
    let surface = animator
        .surface()
        .ok_or(scrollreel::ScrollreelError::MissingSurface)?;
    surface.write_png(&args.out)?;

    eprintln!(
        "wrote {} (frame {})",
        args.out.display(),
        animator.current_index()
    );
    Ok(())
}

fn cmd_scrub(args: ScrubArgs) -> anyhow::Result<()> {
    if args.steps == 0 {
        anyhow::bail!("--steps must be >= 1");
    }
    let (mut host, cfg) = start_host(&args.host)?;
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let write = |host: &HeadlessHost| -> anyhow::Result<()> {
        let animator = host.animator();
        let surface = animator
            .surface()
            .ok_or(scrollreel::ScrollreelError::MissingSurface)?;
        let out = args
            .out_dir
            .join(format!("frame_{:04}.png", animator.current_index().0));
        surface.write_png(&out)?;
        println!("{}", out.display());
        Ok(())
    };

    write(&host)?;
    for step in 1..=args.steps {
        let p = f64::from(step) / f64::from(args.steps);
        host.scroll_to(p * cfg.pin.scroll_distance_px);
        if let Some(outcome) = host.step(1.0 / 60.0)?
            && outcome.is_drawn()
        {
            write(&host)?;
        }
    }
    while !host.timeline().is_settled() {
        if let Some(outcome) = host.step(1.0 / 60.0)?
            && outcome.is_drawn()
        {
            write(&host)?;
        }
    }
    Ok(())
}
