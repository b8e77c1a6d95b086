//! Curated API surface for hosts (CLI, renderers, experiments).
//!
//! The only path a host needs: collect points → `generate` → `load` into a
//! player → drive it (ticks or manual steps) → redraw from `on_step`.

// Points and the turn test
pub use crate::geometry::{cross, is_right_turn, orientation, Turn};
pub use crate::point::{validate_points, Point, PointError};
// Step traces
pub use crate::hull::{generate, Step, StepAction, StepSequence};
// Playback
pub use crate::playback::{
    ManualTicks, PlaybackState, PlaybackStatus, PlayerCfg, PlayerHandle, StepSequencePlayer,
    ThreadTicker, TickSource, DEFAULT_TICK_INTERVAL, MIN_TICK_INTERVAL,
};
// Collaborator helpers
pub use crate::rand::{draw_points, PointCloudCfg, ReplayToken};
pub use crate::view::{Affine2, CoordinateMapper};
