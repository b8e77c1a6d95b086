//! Display ↔ model coordinates.
//!
//! Hosts collect clicks in a display frame (origin top-left, y down) while the
//! hull is computed in the usual mathematical frame (origin bottom-left, y up).
//! The mapping is the vertical flip `y ↦ height − y`, which is its own inverse.
//! With no known height (`height <= 0`) both directions are the identity.

use nalgebra::{Matrix2, Vector2};

use crate::point::Point;

/// 2D affine map: `x ↦ M x + t`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine2 {
    pub m: Matrix2<f64>,
    pub t: Vector2<f64>,
}

impl Affine2 {
    #[inline]
    pub fn identity() -> Self {
        Self {
            m: Matrix2::identity(),
            t: Vector2::zeros(),
        }
    }

    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        Point::from(self.m * p.to_vec2() + self.t)
    }

    /// Inverse map if `m` is invertible.
    #[inline]
    pub fn inverse(&self) -> Option<Self> {
        self.m.try_inverse().map(|minv| Self {
            m: minv,
            t: -minv * self.t,
        })
    }
}

/// Tracks the canvas size and converts between frames.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CoordinateMapper {
    width: f64,
    height: f64,
}

impl CoordinateMapper {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Follow a canvas resize.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }
    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// The flip as an affine map (identity while the height is unknown).
    pub fn flip(&self) -> Affine2 {
        if self.height <= 0.0 {
            return Affine2::identity();
        }
        Affine2 {
            m: Matrix2::new(1.0, 0.0, 0.0, -1.0),
            t: Vector2::new(0.0, self.height),
        }
    }

    #[inline]
    pub fn to_model_y(&self, view_y: f64) -> f64 {
        if self.height <= 0.0 {
            view_y
        } else {
            self.height - view_y
        }
    }

    #[inline]
    pub fn to_view_y(&self, model_y: f64) -> f64 {
        // the flip is an involution
        self.to_model_y(model_y)
    }

    #[inline]
    pub fn to_model(&self, view: Point) -> Point {
        Point::new(view.x, self.to_model_y(view.y))
    }

    #[inline]
    pub fn to_view(&self, model: Point) -> Point {
        Point::new(model.x, self.to_view_y(model.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flips_against_height() {
        let m = CoordinateMapper::new(800.0, 600.0);
        assert_eq!(m.to_model(Point::new(10.0, 0.0)), Point::new(10.0, 600.0));
        assert_eq!(m.to_view(Point::new(10.0, 600.0)), Point::new(10.0, 0.0));
        let p = Point::new(123.0, 45.0);
        assert_eq!(m.to_view(m.to_model(p)), p);
    }

    #[test]
    fn unknown_height_is_identity() {
        let mut m = CoordinateMapper::default();
        let p = Point::new(3.0, 4.0);
        assert_eq!(m.to_model(p), p);
        assert_eq!(m.flip(), Affine2::identity());
        m.resize(10.0, 20.0);
        assert_eq!(m.to_model(p), Point::new(3.0, 16.0));
    }

    #[test]
    fn affine_flip_matches_point_helpers() {
        let m = CoordinateMapper::new(640.0, 480.0);
        let f = m.flip();
        let p = Point::new(17.0, 99.0);
        assert_eq!(f.apply(p), m.to_model(p));
        let inv = f.inverse().unwrap();
        assert_eq!(inv.apply(f.apply(p)), p);
    }
}
