//! Terminal replay of a step trace.
//!
//! The trace runs on a `PlayerHandle`; this module is the renderer (prints each
//! step) and, in manual mode, the input controller (one command per stdin line).

use std::io::BufRead;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use hullstep::hull::{Step, StepSequence};
use hullstep::playback::{PlayerCfg, PlayerHandle};
use hullstep::Point;

/// One line of manual input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Step,
    Play,
    Pause,
    Reset,
    Quit,
}

pub fn parse_key(line: &str) -> Option<Key> {
    match line.trim() {
        "" | "n" | "next" => Some(Key::Step),
        "p" | "play" => Some(Key::Play),
        "s" | "pause" => Some(Key::Pause),
        "r" | "reset" => Some(Key::Reset),
        "q" | "quit" => Some(Key::Quit),
        _ => None,
    }
}

fn chain(points: &[Point]) -> String {
    if points.is_empty() {
        return "-".to_string();
    }
    points
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Single-line rendering of a step.
pub fn render_step(step: &Step) -> String {
    let focus = step
        .focus()
        .map(|p| format!(" @ {p}"))
        .unwrap_or_default();
    format!(
        "[{:>2}] {:<15} {}{}\n     upper: {}\n     lower: {}",
        step.number(),
        format!("{:?}", step.action()),
        step.description(),
        focus,
        chain(step.upper()),
        chain(step.lower()),
    )
}

/// Replay `steps`, either to completion on a timer or under stdin control.
pub fn run(steps: StepSequence, interval: Duration, manual: bool) -> Result<()> {
    if steps.is_empty() {
        bail!("nothing to replay: the trace has no steps");
    }
    let (done_tx, done_rx) = mpsc::channel();
    let handle = PlayerHandle::spawn(
        PlayerCfg {
            tick_interval: interval,
        },
        move |p| {
            p.on_step(|step| println!("{}", render_step(step)));
            p.on_reset(|| println!("-- start --"));
            p.on_complete(move || {
                println!("-- complete --");
                let _ = done_tx.send(());
            });
        },
    )
    .context("spawning player thread")?;
    handle.load(steps);

    if manual {
        println!("enter: step  p: play  s: pause  r: reset  q: quit");
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = line.context("reading stdin")?;
            match parse_key(&line) {
                Some(Key::Step) => handle.step_forward(),
                Some(Key::Play) => handle.play(),
                Some(Key::Pause) => handle.pause(),
                Some(Key::Reset) => handle.reset(),
                Some(Key::Quit) => break,
                None => eprintln!("unknown command {line:?}"),
            }
        }
    } else {
        handle.play();
        done_rx
            .recv()
            .map_err(|_| anyhow!("player stopped before completing"))?;
    }
    if let Some(status) = handle.status() {
        tracing::info!(status = %serde_json::to_string(&status)?, "replay finished");
    }
    handle.shutdown();
    Ok(())
}
