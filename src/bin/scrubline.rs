use std::cell::RefCell;
use std::io::Write as _;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use scrubline::{
    Host, RecordingSink, SceneDef, ScrollScene, Size, StaticLayout, Viewport, compute_state,
};

#[derive(Parser, Debug)]
#[command(name = "scrubline", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a scene for configuration errors.
    Validate(ValidateArgs),
    /// Print the timeline state at evenly spaced progress values (JSON lines).
    Sample(SampleArgs),
    /// Mount a scene against a static layout and sweep the scroll offset (JSON lines).
    Scroll(ScrollArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Viewport size used to resolve viewport-relative values.
    #[arg(long, default_value = "1280x800", value_parser = parse_size)]
    viewport: Size,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Viewport size used to resolve viewport-relative values.
    #[arg(long, default_value = "1280x800", value_parser = parse_size)]
    viewport: Size,

    /// Number of intervals between progress 0 and 1 (prints `samples + 1` lines).
    #[arg(long, default_value_t = 10)]
    samples: u32,
}

#[derive(Parser, Debug)]
struct ScrollArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Layout JSON (viewport size plus element rects in document px).
    #[arg(long)]
    layout: PathBuf,

    /// First scroll offset.
    #[arg(long, default_value_t = 0.0)]
    from: f64,

    /// Last scroll offset (inclusive).
    #[arg(long)]
    to: f64,

    /// Scroll distance per frame.
    #[arg(long, default_value_t = 100.0)]
    step: f64,
}

fn parse_size(s: &str) -> Result<Size, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w: f64 = w.trim().parse().map_err(|e| format!("width '{w}': {e}"))?;
    let h: f64 = h.trim().parse().map_err(|e| format!("height '{h}': {e}"))?;
    if !(w > 0.0 && h > 0.0) {
        return Err(format!("viewport must be positive, got '{s}'"));
    }
    Ok(Size::new(w, h))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Sample(args) => cmd_sample(args),
        Command::Scroll(args) => cmd_scroll(args),
    }
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let scene = SceneDef::from_path(&args.in_path)?;
    scene
        .validate(args.viewport)
        .with_context(|| format!("validate '{}'", args.in_path.display()))?;
    eprintln!("ok {}", args.in_path.display());
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.samples > 0, "--samples must be > 0");
    let scene = SceneDef::from_path(&args.in_path)?;
    let timeline = scene.build_timeline(args.viewport)?;
    let selector = scene.build_selector()?;

    let mut out = std::io::stdout().lock();
    for i in 0..=args.samples {
        let progress = f64::from(i) / f64::from(args.samples);
        let line = serde_json::json!({
            "progress": progress,
            "segment": selector.as_ref().map(|s| s.select(progress)),
            "state": compute_state(&timeline, progress).entries,
        });
        writeln!(out, "{line}").context("write stdout")?;
    }
    Ok(())
}

fn cmd_scroll(args: ScrollArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.step > 0.0, "--step must be > 0");
    anyhow::ensure!(args.to >= args.from, "--to must be >= --from");

    let scene = SceneDef::from_path(&args.in_path)?;
    let layout = Rc::new(StaticLayout::from_path(&args.layout)?);
    let host = Host::new(Viewport {
        size: layout.viewport,
        scroll: args.from,
    });
    let sink = Rc::new(RefCell::new(RecordingSink::new()));
    let mounted = ScrollScene::mount(scene, &host, Rc::clone(&layout), Rc::clone(&sink))
        .with_context(|| format!("mount '{}'", args.in_path.display()))?;

    let changes = Rc::new(RefCell::new(Vec::new()));
    let c = Rc::clone(&changes);
    mounted.on_segment_change(move |change| c.borrow_mut().push(change));

    let mut out = std::io::stdout().lock();
    let emit = |out: &mut std::io::StdoutLock<'_>| -> anyhow::Result<()> {
        let line = serde_json::json!({
            "frame": mounted.frame(),
            "segment_changes": std::mem::take(&mut *changes.borrow_mut()),
            "writes": sink.borrow_mut().take_writes(),
        });
        writeln!(out, "{line}").context("write stdout")
    };
    emit(&mut out)?;

    let frames = ((args.to - args.from) / args.step).floor() as u64;
    for i in 1..=frames {
        host.queue_scroll(args.from + args.step * i as f64);
        host.frame();
        emit(&mut out)?;
    }
    drop(emit);

    mounted.unmount();
    let residual = sink.borrow().residual_overrides();
    let line = serde_json::json!({
        "unmounted": true,
        "listeners": host.listener_count(),
        "residual_overrides": residual,
    });
    writeln!(out, "{line}").context("write stdout")?;
    anyhow::ensure!(
        residual == 0 && host.listener_count() == 0,
        "scene leaked {residual} overrides"
    );
    Ok(())
}
