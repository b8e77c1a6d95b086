//! Planar points keyed by exact coordinates.
//!
//! `Point` has no identity beyond its coordinate pair. Equality and hashing use
//! the raw bit patterns (after folding `-0.0` into `0.0`), so two points are the
//! same map key exactly when their coordinates compare equal. There is no
//! tolerance: `(0.1 + 0.2, 0.0)` and `(0.3, 0.0)` are different points.
//!
//! Coordinates are expected to be finite. Nothing in the hull generator checks
//! this; hosts that accept external input call `validate_points` first.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// A point in the plane.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[inline]
fn fold_zero(v: f64) -> f64 {
    // -0.0 == 0.0 must hash identically
    if v == 0.0 {
        0.0
    } else {
        v
    }
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    fn key(&self) -> (u64, u64) {
        (fold_zero(self.x).to_bits(), fold_zero(self.y).to_bits())
    }

    /// Lexicographic order: x ascending, ties by y ascending.
    ///
    /// Total on every input (uses `f64::total_cmp`), so sorting never panics;
    /// the position of NaN coordinates is well defined but geometrically meaningless.
    #[inline]
    pub fn cmp_xy(&self, other: &Point) -> Ordering {
        fold_zero(self.x)
            .total_cmp(&fold_zero(other.x))
            .then_with(|| fold_zero(self.y).total_cmp(&fold_zero(other.y)))
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[inline]
    pub fn to_vec2(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }
}

impl PartialEq for Point {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Vector2<f64>> for Point {
    #[inline]
    fn from(v: Vector2<f64>) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Point> for Vector2<f64> {
    #[inline]
    fn from(p: Point) -> Self {
        p.to_vec2()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// Input validation failure.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointError {
    NonFinite { index: usize, x: f64, y: f64 },
}

impl fmt::Display for PointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { index, x, y } => {
                write!(f, "point #{index} has a non-finite coordinate ({x}, {y})")
            }
        }
    }
}

impl std::error::Error for PointError {}

/// Reject the first point with a NaN or infinite coordinate.
pub fn validate_points(points: &[Point]) -> Result<(), PointError> {
    match points.iter().position(|p| !p.is_finite()) {
        Some(index) => {
            let p = points[index];
            Err(PointError::NonFinite {
                index,
                x: p.x,
                y: p.y,
            })
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn exact_equality_no_tolerance() {
        let a = Point::new(0.1 + 0.2, 0.0);
        let b = Point::new(0.3, 0.0);
        assert_ne!(a, b);
        assert_eq!(Point::new(1.5, -2.0), Point::from((1.5, -2.0)));
    }

    #[test]
    fn signed_zero_is_one_key() {
        let mut set = HashSet::new();
        set.insert(Point::new(0.0, -0.0));
        assert!(set.contains(&Point::new(-0.0, 0.0)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn cmp_xy_breaks_ties_by_y() {
        let mut pts = vec![
            Point::new(1.0, 2.0),
            Point::new(0.0, 5.0),
            Point::new(1.0, -1.0),
        ];
        pts.sort_by(Point::cmp_xy);
        assert_eq!(
            pts,
            vec![
                Point::new(0.0, 5.0),
                Point::new(1.0, -1.0),
                Point::new(1.0, 2.0)
            ]
        );
    }

    #[test]
    fn validate_reports_first_bad_index() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(f64::INFINITY, 1.0),
            Point::new(f64::NAN, 0.0),
        ];
        match validate_points(&pts) {
            Err(PointError::NonFinite { index, .. }) => assert_eq!(index, 1),
            other => panic!("unexpected {other:?}"),
        }
        assert!(validate_points(&pts[..1]).is_ok());
    }

    #[test]
    fn display_one_decimal() {
        assert_eq!(Point::new(1.26, -3.0).to_string(), "(1.3, -3.0)");
    }
}
