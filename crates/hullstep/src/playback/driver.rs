//! Serialized playback for multi-threaded hosts.
//!
//! One owner thread holds the `StepSequencePlayer` and its `ThreadTicker`.
//! Commands from callers and ticks from the ticker arrive on the same channel,
//! so every state change happens on that thread, in arrival order.
//!
//! `pause` and `reset` wait for the owner thread to acknowledge. Once they
//! return, no further `on_step` is delivered until the caller resumes: queued
//! ticks from the cancelled run carry a stale generation and are dropped.

use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use tracing::{trace, warn};

use super::player::{PlaybackStatus, PlayerCfg, StepSequencePlayer};
use super::tick::{ThreadTicker, TickSource};
use crate::hull::StepSequence;

enum Command {
    Load(StepSequence),
    Play,
    Pause,
    StepForward,
    Reset,
    Tick(u64),
    Sync(Sender<PlaybackStatus>),
    Shutdown,
}

/// Handle to a player running on its own thread.
pub struct PlayerHandle {
    tx: Sender<Command>,
    worker: Option<JoinHandle<()>>,
}

impl PlayerHandle {
    /// Spawn the owner thread. `configure` runs on that thread before any
    /// command is processed; register callbacks there.
    pub fn spawn<F>(cfg: PlayerCfg, configure: F) -> io::Result<Self>
    where
        F: FnOnce(&mut StepSequencePlayer<ThreadTicker>) + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let tick_tx = tx.clone();
        let worker = thread::Builder::new()
            .name("hullstep-player".into())
            .spawn(move || {
                let ticker = ThreadTicker::new(move |gen| {
                    let _ = tick_tx.send(Command::Tick(gen));
                });
                let mut player = StepSequencePlayer::new(cfg, ticker);
                configure(&mut player);
                serve(player, rx);
            })?;
        Ok(Self {
            tx,
            worker: Some(worker),
        })
    }

    pub fn load(&self, steps: StepSequence) {
        self.send(Command::Load(steps));
    }
    pub fn play(&self) {
        self.send(Command::Play);
    }
    pub fn step_forward(&self) {
        self.send(Command::StepForward);
    }

    /// Pause and wait until the owner thread has applied it.
    pub fn pause(&self) {
        self.send(Command::Pause);
        let _ = self.status();
    }

    /// Reset and wait until the owner thread has applied it.
    pub fn reset(&self) {
        self.send(Command::Reset);
        let _ = self.status();
    }

    /// Current status, after every previously sent command has been applied.
    /// `None` if the owner thread is gone.
    pub fn status(&self) -> Option<PlaybackStatus> {
        let (ack_tx, ack_rx) = mpsc::channel();
        self.send(Command::Sync(ack_tx));
        ack_rx.recv().ok()
    }

    /// Stop ticking and join the owner thread.
    pub fn shutdown(mut self) {
        self.join();
    }

    fn send(&self, cmd: Command) {
        if self.tx.send(cmd).is_err() {
            warn!("player thread is gone; command dropped");
        }
    }

    fn join(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = self.tx.send(Command::Shutdown);
            if worker.join().is_err() {
                warn!("player thread panicked");
            }
        }
    }
}

impl Drop for PlayerHandle {
    fn drop(&mut self) {
        self.join();
    }
}

fn serve(mut player: StepSequencePlayer<ThreadTicker>, rx: Receiver<Command>) {
    while let Ok(cmd) = rx.recv() {
        match cmd {
            Command::Load(steps) => player.load(steps),
            Command::Play => player.play(),
            Command::Pause => player.pause(),
            Command::StepForward => player.step_forward(),
            Command::Reset => player.reset(),
            Command::Tick(gen) => {
                if player.ticks().is_running() && gen == player.ticks().generation() {
                    player.tick();
                } else {
                    trace!(gen, "stale tick dropped");
                }
            }
            Command::Sync(ack) => {
                let _ = ack.send(player.status());
            }
            Command::Shutdown => break,
        }
    }
    player.ticks_mut().stop();
}
