use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use hullstep::playback::DEFAULT_TICK_INTERVAL;
use hullstep::rand::{draw_points, PointCloudCfg, ReplayToken};
use serde_json::json;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod io;
mod provenance;
mod replay;

use provenance::{write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "hullstep")]
#[command(about = "Step-by-step convex hull traces and their playback", version)]
struct Cmd {
    /// More log output on stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Draw a reproducible random point cloud
    Points {
        #[arg(long, default_value_t = PointCloudCfg::default().count)]
        count: usize,
        #[arg(long, default_value_t = PointCloudCfg::default().width)]
        width: f64,
        #[arg(long, default_value_t = PointCloudCfg::default().height)]
        height: f64,
        #[arg(long, default_value_t = PointCloudCfg::default().padding)]
        padding: f64,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 0)]
        index: u64,
        /// Output file (.json, .csv or .parquet)
        #[arg(long)]
        out: PathBuf,
    },
    /// Compute the step trace for a point table
    Trace {
        /// Point table (.json, .csv or .parquet)
        #[arg(long)]
        input: PathBuf,
        /// Trace JSON output
        #[arg(long)]
        out: PathBuf,
    },
    /// Replay a trace (or a point table) in the terminal
    Play {
        /// Trace JSON or point table
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value_t = DEFAULT_TICK_INTERVAL.as_millis() as u64)]
        interval_ms: u64,
        /// Step with commands from stdin instead of the timer
        #[arg(long)]
        manual: bool,
    },
    /// Print a small provenance JSON block
    Report,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    init_logging(cmd.verbose);
    match cmd.action {
        Action::Points {
            count,
            width,
            height,
            padding,
            seed,
            index,
            out,
        } => points(
            PointCloudCfg {
                count,
                width,
                height,
                padding,
            },
            ReplayToken { seed, index },
            out,
        ),
        Action::Trace { input, out } => trace(input, out),
        Action::Play {
            input,
            interval_ms,
            manual,
        } => play(input, interval_ms, manual),
        Action::Report => report(),
    }
}

fn points(cfg: PointCloudCfg, tok: ReplayToken, out: PathBuf) -> Result<()> {
    let pts = draw_points(cfg, tok);
    tracing::info!(count = pts.len(), out = %out.display(), "points");
    io::write_points(&out, &pts)?;
    write_sidecar(
        &out,
        Payload::new(
            "points",
            json!({
                "count": cfg.count,
                "width": cfg.width,
                "height": cfg.height,
                "padding": cfg.padding,
                "seed": tok.seed,
                "index": tok.index
            }),
        ),
    )?;
    Ok(())
}

fn trace(input: PathBuf, out: PathBuf) -> Result<()> {
    let pts = io::read_points(&input)?;
    let trace = io::trace_of(pts);
    let hull = trace
        .steps
        .final_hull()
        .context("trace has no finalized step")?;
    tracing::info!(
        points = trace.points.len(),
        steps = trace.steps.len(),
        hull = hull.len(),
        "trace"
    );
    io::write_trace(&out, &trace)?;
    write_sidecar(
        &out,
        Payload::new(
            "trace",
            json!({
                "input": input.to_string_lossy(),
                "points": trace.points.len(),
                "steps": trace.steps.len(),
                "hull": hull.len()
            }),
        ),
    )?;
    Ok(())
}

fn play(input: PathBuf, interval_ms: u64, manual: bool) -> Result<()> {
    let trace = io::read_playable(&input)?;
    tracing::info!(
        input = %input.display(),
        steps = trace.steps.len(),
        interval_ms,
        manual,
        "play"
    );
    replay::run(trace.steps, Duration::from_millis(interval_ms), manual)
}

fn report() -> Result<()> {
    let doc = provenance::document(&Payload::new("report", json!({})), &[]);
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}
