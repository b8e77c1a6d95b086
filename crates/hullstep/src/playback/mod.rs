//! Playback of hull step traces.
//!
//! Purpose
//! - Drive consumption of a `StepSequence` on a fixed cadence or one step at a
//!   time, with pause/resume/reset and exactly-once completion.
//!
//! Model
//! - Single-threaded core: `StepSequencePlayer` is plain state plus callbacks.
//! - Time comes from an injected `TickSource`; `ManualTicks` makes the state
//!   machine testable without sleeping.
//! - Threaded hosts wrap the player in a `PlayerHandle`, which funnels every
//!   mutation (commands and ticks alike) through one owner thread.
//!
//! Layout
//! - `tick.rs` (tick sources), `player.rs` (state machine), `driver.rs` (owner thread).

mod driver;
mod player;
mod tick;

pub use driver::PlayerHandle;
pub use player::{
    PlaybackState, PlaybackStatus, PlayerCfg, StepSequencePlayer, DEFAULT_TICK_INTERVAL,
};
pub use tick::{ManualTicks, ThreadTicker, TickSource, MIN_TICK_INTERVAL};
