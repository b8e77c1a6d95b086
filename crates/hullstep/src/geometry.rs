use nalgebra::{Matrix2, Vector2};

use crate::point::Point;

/// Signed area of the parallelogram spanned by `u` and `v`.
/// Positive for u→v counterclockwise, negative for clockwise, zero if parallel.
#[inline]
pub fn cross(u: Vector2<f64>, v: Vector2<f64>) -> f64 {
    // determinant of [u v]
    Matrix2::from_columns(&[u, v]).determinant()
}

/// Orientation of the path a → b → c.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    Left,
    Right,
    Collinear,
}

/// Classify a → b → c by the sign of `cross(b - a, c - b)`.
pub fn orientation(a: Point, b: Point, c: Point) -> Turn {
    let (a, b, c) = (a.to_vec2(), b.to_vec2(), c.to_vec2());
    let z = cross(b - a, c - b);
    if z < 0.0 {
        Turn::Right
    } else if z > 0.0 {
        Turn::Left
    } else {
        Turn::Collinear
    }
}

/// Strict clockwise turn. Collinear (including repeated points) is not a right
/// turn, which is what keeps collinear boundary points off the hull.
#[inline]
pub fn is_right_turn(a: Point, b: Point, c: Point) -> bool {
    orientation(a, b, c) == Turn::Right
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn cross_axis_aligned() {
        let u = vector![1.0, 0.0];
        let v = vector![0.0, 2.5];
        assert!((cross(u, v) - 2.5).abs() < 1e-12);
        assert!((cross(v, u) + 2.5).abs() < 1e-12);
    }

    #[test]
    fn cross_randomized_seeded() {
        let mut rng = StdRng::seed_from_u64(42);
        let u = Vector2::new(rng.gen_range(-2.0..2.0), rng.gen_range(-2.0..2.0));
        let v = Vector2::new(rng.gen_range(-2.0..2.0), rng.gen_range(-2.0..2.0));
        let expected = u.x * v.y - u.y * v.x;
        assert!((cross(u, v) - expected).abs() < 1e-12);
    }

    #[test]
    fn turns() {
        let a = Point::new(0.0, 0.0);
        // peak: up then down is clockwise
        assert_eq!(
            orientation(a, Point::new(1.0, 1.0), Point::new(2.0, 0.0)),
            Turn::Right
        );
        assert_eq!(
            orientation(a, Point::new(1.0, -1.0), Point::new(2.0, 0.0)),
            Turn::Left
        );
        assert_eq!(
            orientation(a, Point::new(1.0, 0.0), Point::new(2.0, 0.0)),
            Turn::Collinear
        );
        assert!(!is_right_turn(a, a, Point::new(3.0, -1.0)));
    }
}
