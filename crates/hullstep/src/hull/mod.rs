//! Monotone-chain convex hull with a full step trace.
//!
//! Purpose
//! - Run Andrew's monotone chain and keep every intermediate configuration
//!   (sort, each append, each reduction, trim, combine) as an immutable `Step`.
//! - The trace is the product; the final hull is just its last record.
//!
//! Conventions
//! - Strict hull: collinear boundary points are dropped (collinear is not a right turn).
//! - Output order: upper chain left→right, then the trimmed lower chain right→left.
//! - Step numbers follow the textbook numbering of the algorithm, so they have gaps.
//! - Input is processed positionally; duplicates are not removed up front.
//!
//! Layout
//! - `types.rs` (Step, StepAction, StepSequence) and `chain.rs` (the generator).

mod chain;
mod types;

pub use chain::{
    generate, STEP_COMBINE, STEP_FINALIZE, STEP_LOWER_APPEND, STEP_LOWER_INIT,
    STEP_LOWER_REDUCE, STEP_LOWER_TRIM, STEP_SORT, STEP_UPPER_APPEND, STEP_UPPER_INIT,
    STEP_UPPER_REDUCE,
};
pub use types::{Step, StepAction, StepSequence};
