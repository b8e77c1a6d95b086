//! Reproducible random point clouds.
//!
//! Purpose
//! - Feed the hull generator with uniform points inside a padded rectangle,
//!   e.g. a canvas of `width × height` with a margin of `padding` on every side.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG, so a
//!   cloud can be regenerated from the two numbers printed next to it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::point::Point;

/// Sampling rectangle and point count.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointCloudCfg {
    pub count: usize,
    pub width: f64,
    pub height: f64,
    /// Margin kept free on each side.
    pub padding: f64,
}

impl Default for PointCloudCfg {
    fn default() -> Self {
        Self {
            count: 20,
            width: 800.0,
            height: 600.0,
            padding: 40.0,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }

    /// Token for the next draw in the same stream.
    #[inline]
    pub fn next(self) -> Self {
        Self {
            seed: self.seed,
            index: self.index.wrapping_add(1),
        }
    }
}

/// Draw `cfg.count` points uniformly from
/// `[padding, width - padding) × [padding, height - padding)`.
///
/// Returns an empty list when `count == 0` or the padded rectangle has no area
/// (including non-finite dimensions).
pub fn draw_points(cfg: PointCloudCfg, tok: ReplayToken) -> Vec<Point> {
    let usable_w = (cfg.width - 2.0 * cfg.padding).max(0.0);
    let usable_h = (cfg.height - 2.0 * cfg.padding).max(0.0);
    if cfg.count == 0 || !(usable_w.is_finite() && usable_h.is_finite()) {
        return Vec::new();
    }
    if usable_w == 0.0 || usable_h == 0.0 {
        return Vec::new();
    }
    let mut rng = tok.to_std_rng();
    (0..cfg.count)
        .map(|_| {
            let x = cfg.padding + rng.gen::<f64>() * usable_w;
            let y = cfg.padding + rng.gen::<f64>() * usable_h;
            Point::new(x, y)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reproducible_draw() {
        let cfg = PointCloudCfg {
            count: 50,
            ..PointCloudCfg::default()
        };
        let tok = ReplayToken { seed: 42, index: 7 };
        assert_eq!(draw_points(cfg, tok), draw_points(cfg, tok));
        assert_ne!(draw_points(cfg, tok), draw_points(cfg, tok.next()));
    }

    #[test]
    fn points_stay_inside_padding() {
        let cfg = PointCloudCfg {
            count: 500,
            width: 100.0,
            height: 50.0,
            padding: 10.0,
        };
        let pts = draw_points(cfg, ReplayToken { seed: 1, index: 0 });
        assert_eq!(pts.len(), 500);
        for p in pts {
            assert!((10.0..90.0).contains(&p.x), "{p}");
            assert!((10.0..40.0).contains(&p.y), "{p}");
        }
    }

    #[test]
    fn degenerate_rectangles_yield_nothing() {
        let tok = ReplayToken { seed: 3, index: 3 };
        let none = PointCloudCfg {
            count: 0,
            ..PointCloudCfg::default()
        };
        assert!(draw_points(none, tok).is_empty());
        let squashed = PointCloudCfg {
            count: 10,
            width: 40.0,
            height: 600.0,
            padding: 20.0,
        };
        assert!(draw_points(squashed, tok).is_empty());
        let overpadded = PointCloudCfg {
            padding: 1e6,
            ..PointCloudCfg::default()
        };
        assert!(draw_points(overpadded, tok).is_empty());
    }
}
