//! Step-traced convex hulls and their playback.
//!
//! Two pieces do the real work:
//! - `hull::generate` runs Andrew's monotone chain over a point list and records
//!   every intermediate configuration as an immutable `Step`.
//! - `playback::StepSequencePlayer` replays such a trace, either on a fixed tick
//!   cadence or one step at a time, with pause/resume/reset.
//!
//! Everything else (`rand`, `view`) is support code for hosts that collect
//! points and draw steps.
//!
//! API Policy
//! - The crate is consumed by the `hullstep` CLI in this workspace; `api` and
//!   `prelude` are the intended import surfaces.

pub mod api;
pub mod geometry;
pub mod hull;
pub mod playback;
pub mod point;
pub mod rand;
pub mod view;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use point::{validate_points, Point, PointError};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geometry::{is_right_turn, orientation, Turn};
    pub use crate::hull::{generate, Step, StepAction, StepSequence};
    pub use crate::playback::{
        ManualTicks, PlaybackState, PlayerCfg, PlayerHandle, StepSequencePlayer, TickSource,
    };
    pub use crate::point::{validate_points, Point, PointError};
    pub use crate::rand::{draw_points, PointCloudCfg, ReplayToken};
    pub use crate::view::CoordinateMapper;
}
