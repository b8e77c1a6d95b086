//! Step records and the immutable step sequence.

use std::ops::Index;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::point::Point;

/// What a step did to the chains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepAction {
    Sorted,
    UpperAppend,
    UpperReduction,
    LowerAppend,
    LowerReduction,
    Finalized,
}

impl StepAction {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, StepAction::Finalized)
    }
}

/// One snapshot of algorithm progress.
///
/// Chains are owned copies taken when the step is recorded; a `Step` never
/// changes after construction and can be retained indefinitely.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Step {
    number: u32,
    action: StepAction,
    upper: Vec<Point>,
    lower: Vec<Point>,
    description: String,
    focus: Option<Point>,
}

impl Step {
    pub fn new(
        number: u32,
        action: StepAction,
        upper: &[Point],
        lower: &[Point],
        description: impl Into<String>,
        focus: Option<Point>,
    ) -> Self {
        Self {
            number,
            action,
            upper: upper.to_vec(),
            lower: lower.to_vec(),
            description: description.into(),
            focus,
        }
    }

    /// Algorithm step number (1-based, with gaps).
    #[inline]
    pub fn number(&self) -> u32 {
        self.number
    }
    #[inline]
    pub fn action(&self) -> StepAction {
        self.action
    }
    #[inline]
    pub fn upper(&self) -> &[Point] {
        &self.upper
    }
    #[inline]
    pub fn lower(&self) -> &[Point] {
        &self.lower
    }
    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }
    #[inline]
    pub fn focus(&self) -> Option<Point> {
        self.focus
    }

    /// Upper chain followed by lower chain. On a `Finalized` step this is the hull.
    pub fn hull(&self) -> Vec<Point> {
        let mut out = Vec::with_capacity(self.upper.len() + self.lower.len());
        out.extend_from_slice(&self.upper);
        out.extend_from_slice(&self.lower);
        out
    }
}

/// Ordered, immutable trace from one generator run.
///
/// Clones share the same storage.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Step>", into = "Vec<Step>")]
pub struct StepSequence {
    steps: Arc<[Step]>,
}

impl StepSequence {
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
    #[inline]
    pub fn get(&self, idx: usize) -> Option<&Step> {
        self.steps.get(idx)
    }
    #[inline]
    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }
    #[inline]
    pub fn as_slice(&self) -> &[Step] {
        &self.steps
    }

    /// Hull carried by the last step, if that step is `Finalized`.
    pub fn final_hull(&self) -> Option<Vec<Point>> {
        self.last()
            .filter(|s| s.action().is_terminal())
            .map(Step::hull)
    }
}

impl From<Vec<Step>> for StepSequence {
    fn from(steps: Vec<Step>) -> Self {
        Self {
            steps: steps.into(),
        }
    }
}

impl From<StepSequence> for Vec<Step> {
    fn from(seq: StepSequence) -> Self {
        seq.steps.to_vec()
    }
}

impl Index<usize> for StepSequence {
    type Output = Step;
    #[inline]
    fn index(&self, idx: usize) -> &Step {
        &self.steps[idx]
    }
}

impl<'a> IntoIterator for &'a StepSequence {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;
    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
