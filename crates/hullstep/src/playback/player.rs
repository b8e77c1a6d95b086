//! Step-sequence playback state machine.
//!
//! States: `Empty → Ready → {Playing ⇄ Paused} → Completed`, with `reset`
//! returning to `Ready` (or `Empty`) and `load` starting over with a new trace.
//!
//! Invariants
//! - Steps reach `on_step` in ascending cursor order, each exactly once per
//!   traversal. Timer ticks and `step_forward` share `advance`, so mixing them
//!   never skips or repeats a step.
//! - `on_complete` fires once per traversal, on the advance that finds the
//!   cursor already at the end.
//! - Calls that make no sense in the current state are no-ops, never errors.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::tick::{ManualTicks, TickSource};
use crate::hull::{Step, StepSequence};

/// Default spacing between automatic advances.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(600);

/// Player configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerCfg {
    /// Spacing between automatic advances; tick sources raise it to at least
    /// `MIN_TICK_INTERVAL`.
    pub tick_interval: Duration,
}

impl Default for PlayerCfg {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }
}

/// Lifecycle of the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Nothing (or an empty trace) loaded.
    Empty,
    /// Trace loaded, cursor at 0, nothing emitted yet.
    Ready,
    /// Tick source running.
    Playing,
    /// Stopped mid-trace; also entered by manual stepping.
    Paused,
    /// Cursor ran past the end and completion was signalled.
    Completed,
}

/// Snapshot of where playback stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackStatus {
    pub state: PlaybackState,
    pub cursor: usize,
    pub total: usize,
}

type StepFn = Box<dyn FnMut(&Step) + Send>;
type SignalFn = Box<dyn FnMut() + Send>;

/// Replays a `StepSequence` through registered callbacks.
pub struct StepSequencePlayer<T: TickSource> {
    cfg: PlayerCfg,
    ticks: T,
    steps: StepSequence,
    cursor: usize,
    state: PlaybackState,
    on_step: Option<StepFn>,
    on_reset: Option<SignalFn>,
    on_complete: Option<SignalFn>,
}

impl<T: TickSource> fmt::Debug for StepSequencePlayer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepSequencePlayer")
            .field("cfg", &self.cfg)
            .field("state", &self.state)
            .field("cursor", &self.cursor)
            .field("total", &self.steps.len())
            .finish_non_exhaustive()
    }
}

impl StepSequencePlayer<ManualTicks> {
    /// Player driven by a fake clock.
    pub fn manual(cfg: PlayerCfg) -> Self {
        Self::new(cfg, ManualTicks::new())
    }

    /// Advance the fake clock and deliver every tick that fell due.
    /// Returns the number of ticks fired.
    pub fn elapse(&mut self, elapsed: Duration) -> usize {
        let fired = self.ticks.elapse(elapsed);
        for _ in 0..fired {
            self.tick();
        }
        fired
    }
}

impl<T: TickSource> StepSequencePlayer<T> {
    pub fn new(cfg: PlayerCfg, ticks: T) -> Self {
        Self {
            cfg,
            ticks,
            steps: StepSequence::default(),
            cursor: 0,
            state: PlaybackState::Empty,
            on_step: None,
            on_reset: None,
            on_complete: None,
        }
    }

    #[inline]
    pub fn cfg(&self) -> PlayerCfg {
        self.cfg
    }
    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.state
    }
    /// Index of the next step to emit.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }
    #[inline]
    pub fn steps(&self) -> &StepSequence {
        &self.steps
    }
    #[inline]
    pub fn ticks(&self) -> &T {
        &self.ticks
    }
    #[inline]
    pub fn ticks_mut(&mut self) -> &mut T {
        &mut self.ticks
    }
    #[inline]
    pub fn has_steps(&self) -> bool {
        !self.steps.is_empty()
    }
    #[inline]
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn status(&self) -> PlaybackStatus {
        PlaybackStatus {
            state: self.state,
            cursor: self.cursor,
            total: self.steps.len(),
        }
    }

    pub fn on_step(&mut self, f: impl FnMut(&Step) + Send + 'static) {
        self.on_step = Some(Box::new(f));
    }
    pub fn on_reset(&mut self, f: impl FnMut() + Send + 'static) {
        self.on_reset = Some(Box::new(f));
    }
    pub fn on_complete(&mut self, f: impl FnMut() + Send + 'static) {
        self.on_complete = Some(Box::new(f));
    }
    pub fn clear_on_step(&mut self) {
        self.on_step = None;
    }
    pub fn clear_on_reset(&mut self) {
        self.on_reset = None;
    }
    pub fn clear_on_complete(&mut self) {
        self.on_complete = None;
    }

    /// Replace the trace and rewind. Stops any running ticks.
    pub fn load(&mut self, steps: StepSequence) {
        self.ticks.stop();
        self.steps = steps;
        self.cursor = 0;
        let next = if self.has_steps() {
            PlaybackState::Ready
        } else {
            PlaybackState::Empty
        };
        self.transition(next);
        debug!(total = self.steps.len(), "trace loaded");
        self.fire_reset();
    }

    /// Start periodic advancing. Ignored without steps, while already playing,
    /// and after completion (reset or load first).
    pub fn play(&mut self) {
        match self.state {
            PlaybackState::Ready | PlaybackState::Paused => {
                self.ticks.start(self.cfg.tick_interval);
                self.transition(PlaybackState::Playing);
            }
            PlaybackState::Empty | PlaybackState::Playing | PlaybackState::Completed => {}
        }
    }

    /// Stop periodic advancing; the cursor stays put.
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.ticks.stop();
            self.transition(PlaybackState::Paused);
        }
    }

    /// One synchronous advance, whether playing or not.
    pub fn step_forward(&mut self) {
        match self.state {
            PlaybackState::Empty | PlaybackState::Completed => {}
            PlaybackState::Ready => {
                self.transition(PlaybackState::Paused);
                self.advance();
            }
            PlaybackState::Playing | PlaybackState::Paused => self.advance(),
        }
    }

    /// Entry point for the tick source. Ticks that arrive when not playing
    /// (e.g. already queued before a pause) are dropped.
    pub fn tick(&mut self) {
        if self.state == PlaybackState::Playing {
            self.advance();
        } else {
            trace!(state = ?self.state, "tick ignored");
        }
    }

    /// Stop, rewind to the first step, and signal `on_reset`.
    pub fn reset(&mut self) {
        self.ticks.stop();
        self.cursor = 0;
        let next = if self.has_steps() {
            PlaybackState::Ready
        } else {
            PlaybackState::Empty
        };
        self.transition(next);
        self.fire_reset();
    }

    fn advance(&mut self) {
        if let Some(step) = self.steps.get(self.cursor) {
            trace!(cursor = self.cursor, number = step.number(), "emit step");
            if let Some(f) = self.on_step.as_mut() {
                f(step);
            }
            self.cursor += 1;
            return;
        }
        self.ticks.stop();
        self.transition(PlaybackState::Completed);
        if let Some(f) = self.on_complete.as_mut() {
            f();
        }
    }

    fn fire_reset(&mut self) {
        if let Some(f) = self.on_reset.as_mut() {
            f();
        }
    }

    fn transition(&mut self, next: PlaybackState) {
        if self.state != next {
            debug!(from = ?self.state, to = ?next, cursor = self.cursor, "playback");
            self.state = next;
        }
    }
}
