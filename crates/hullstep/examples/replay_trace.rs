//! Print the step trace for a small random cloud, replayed through a manual player.
//!
//! Usage:
//!   cargo run -p hullstep --example replay_trace -- [count] [seed]

use std::time::Duration;

use hullstep::prelude::*;

fn main() {
    let mut args = std::env::args().skip(1);
    let count = args.next().and_then(|s| s.parse().ok()).unwrap_or(8);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(2025);
    let cfg = PointCloudCfg {
        count,
        width: 100.0,
        height: 100.0,
        padding: 5.0,
    };
    let points = draw_points(cfg, ReplayToken { seed, index: 0 });
    let seq = generate(&points);

    let tick = Duration::from_millis(600);
    let mut player = StepSequencePlayer::manual(PlayerCfg { tick_interval: tick });
    player.on_step(|step| {
        println!(
            "[{:>2}] {:<16} upper={} lower={}  {}",
            step.number(),
            format!("{:?}", step.action()),
            step.upper().len(),
            step.lower().len(),
            step.description()
        );
    });
    player.on_complete(|| println!("done"));
    player.load(seq.clone());
    player.play();
    player.elapse(tick * (seq.len() as u32 + 1));

    if let Some(hull) = seq.final_hull() {
        let verts: Vec<String> = hull.iter().map(|p| p.to_string()).collect();
        println!("hull ({} of {} points): {}", hull.len(), points.len(), verts.join(" "));
    }
}
