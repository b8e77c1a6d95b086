//! Andrew's monotone chain, recording a `Step` after every change.

use tracing::debug;

use super::types::{Step, StepAction, StepSequence};
use crate::geometry::is_right_turn;
use crate::point::Point;

/// Sort the points by x (ties by y).
pub const STEP_SORT: u32 = 1;
/// Seed the upper chain with p1, p2.
pub const STEP_UPPER_INIT: u32 = 2;
/// Append p_i to the upper chain.
pub const STEP_UPPER_APPEND: u32 = 4;
/// Drop the middle of the last three upper points.
pub const STEP_UPPER_REDUCE: u32 = 6;
/// Seed the lower chain with p_n, p_{n-1}.
pub const STEP_LOWER_INIT: u32 = 7;
/// Append p_i to the lower chain.
pub const STEP_LOWER_APPEND: u32 = 9;
/// Drop the middle of the last three lower points.
pub const STEP_LOWER_REDUCE: u32 = 11;
/// Drop the lower chain's endpoints (shared with the upper chain).
pub const STEP_LOWER_TRIM: u32 = 12;
/// Concatenate upper and lower chains.
pub const STEP_COMBINE: u32 = 13;
/// Hull ready.
pub const STEP_FINALIZE: u32 = 14;

/// Which chain a reduction pass works on.
#[derive(Clone, Copy)]
enum Side {
    Upper,
    Lower,
}

impl Side {
    fn name(self) -> &'static str {
        match self {
            Side::Upper => "upper",
            Side::Lower => "lower",
        }
    }
    fn append(self) -> (u32, StepAction) {
        match self {
            Side::Upper => (STEP_UPPER_APPEND, StepAction::UpperAppend),
            Side::Lower => (STEP_LOWER_APPEND, StepAction::LowerAppend),
        }
    }
    fn reduce(self) -> (u32, StepAction) {
        match self {
            Side::Upper => (STEP_UPPER_REDUCE, StepAction::UpperReduction),
            Side::Lower => (STEP_LOWER_REDUCE, StepAction::LowerReduction),
        }
    }
}

/// Accumulates steps while the chains are being built.
struct Recorder {
    steps: Vec<Step>,
    upper: Vec<Point>,
    lower: Vec<Point>,
}

impl Recorder {
    fn with_capacity(n: usize) -> Self {
        Self {
            // per point: one append and at most one removal on each chain
            steps: Vec::with_capacity(4 * n + 6),
            upper: Vec::with_capacity(n),
            lower: Vec::with_capacity(n),
        }
    }

    fn record(
        &mut self,
        number: u32,
        action: StepAction,
        description: impl Into<String>,
        focus: Option<Point>,
    ) {
        let step = Step::new(
            number,
            action,
            &self.upper,
            &self.lower,
            description,
            focus,
        );
        self.steps.push(step);
    }

    fn chain_mut(&mut self, side: Side) -> &mut Vec<Point> {
        match side {
            Side::Upper => &mut self.upper,
            Side::Lower => &mut self.lower,
        }
    }

    /// Append `p`, then pop middles until the last three points turn right.
    ///
    /// Each point is removed at most once after being appended, so the total work
    /// over a whole chain is linear.
    fn push_and_reduce(&mut self, side: Side, p: Point) {
        self.chain_mut(side).push(p);
        let (num, action) = side.append();
        self.record(
            num,
            action,
            format!("Append {p} to {} hull", side.name()),
            Some(p),
        );
        loop {
            let chain = self.chain_mut(side);
            let k = chain.len();
            if k <= 2 || is_right_turn(chain[k - 3], chain[k - 2], chain[k - 1]) {
                break;
            }
            let removed = chain.remove(k - 2);
            let (num, action) = side.reduce();
            self.record(
                num,
                action,
                format!("Remove middle point from {} hull: {removed}", side.name()),
                Some(removed),
            );
        }
    }
}

/// Compute the convex hull of `points` and return the full step trace.
///
/// Never fails. The last step is always `Finalized`:
/// - no points: a single `Finalized` step with an empty hull;
/// - one or two points: `Sorted`, then `Finalized` with the sorted points as the hull;
/// - otherwise the full upper/lower construction, ending in combine + finalize.
///
/// Precondition: finite coordinates (see `validate_points`). NaN or infinite input
/// does not panic but yields a meaningless hull.
pub fn generate(points: &[Point]) -> StepSequence {
    let mut sorted = points.to_vec();
    // stable sort: equal keys keep their input order
    sorted.sort_by(Point::cmp_xy);
    let n = sorted.len();
    let mut rec = Recorder::with_capacity(n);

    if n == 0 {
        rec.record(STEP_FINALIZE, StepAction::Finalized, "No points: empty hull", None);
        return finish(rec);
    }

    let last = sorted.last().copied();
    rec.record(
        STEP_SORT,
        StepAction::Sorted,
        "Points sorted by x then y",
        last,
    );

    if n <= 2 {
        rec.upper = sorted;
        rec.record(STEP_FINALIZE, StepAction::Finalized, "Trivial hull", last);
        return finish(rec);
    }

    rec.upper.extend_from_slice(&sorted[..2]);
    rec.record(
        STEP_UPPER_INIT,
        StepAction::UpperAppend,
        "Initialize upper hull",
        Some(sorted[1]),
    );
    for &p in &sorted[2..] {
        rec.push_and_reduce(Side::Upper, p);
    }

    rec.lower.push(sorted[n - 1]);
    rec.lower.push(sorted[n - 2]);
    rec.record(
        STEP_LOWER_INIT,
        StepAction::LowerAppend,
        "Initialize lower hull",
        Some(sorted[n - 2]),
    );
    for &p in sorted[..n - 2].iter().rev() {
        rec.push_and_reduce(Side::Lower, p);
    }

    // The lower chain starts at p_n and ends at p_1, both already on the upper chain.
    rec.lower.pop();
    if !rec.lower.is_empty() {
        rec.lower.remove(0);
    }
    rec.record(
        STEP_LOWER_TRIM,
        StepAction::LowerReduction,
        "Trim lower hull endpoints",
        None,
    );

    rec.record(
        STEP_COMBINE,
        StepAction::Finalized,
        "Combine upper and lower hull",
        None,
    );
    rec.record(
        STEP_FINALIZE,
        StepAction::Finalized,
        "Convex hull ready",
        None,
    );
    finish(rec)
}

fn finish(rec: Recorder) -> StepSequence {
    debug!(
        steps = rec.steps.len(),
        hull = rec.upper.len() + rec.lower.len(),
        "hull trace generated"
    );
    StepSequence::from(rec.steps)
}
