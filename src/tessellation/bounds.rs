//! Axis-aligned working rectangles

use crate::cell::Point;
use crate::error::{HexCoverageError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in projected coordinates
///
/// Always satisfies `min_x < max_x` and `min_y < max_y` with finite values
/// when constructed through [`Bounds::new`] or [`Bounds::around`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Create validated bounds
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if any coordinate is not finite or if
    /// `min >= max` on either axis.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Self> {
        if ![min_x, min_y, max_x, max_y].iter().all(|v| v.is_finite()) {
            return Err(HexCoverageError::InvalidConfig(format!(
                "bounds must be finite (got ({}, {}) - ({}, {}))",
                min_x, min_y, max_x, max_y
            )));
        }
        if min_x >= max_x || min_y >= max_y {
            return Err(HexCoverageError::InvalidConfig(format!(
                "bounds must satisfy min < max on both axes (got ({}, {}) - ({}, {}))",
                min_x, min_y, max_x, max_y
            )));
        }
        Ok(Self {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    /// Bounding box of a circular buffer of `distance` around `center`
    pub fn around(center: Point, distance: f64) -> Result<Self> {
        Self::new(
            center.x - distance,
            center.y - distance,
            center.x + distance,
            center.y + distance,
        )
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) * 0.5,
            (self.min_y + self.max_y) * 0.5,
        )
    }

    /// Check whether a point lies inside the rectangle (edges included)
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Grow the rectangle by `dx` on both x edges and `dy` on both y edges
    ///
    /// Not re-validated: callers only ever pass non-negative margins.
    pub(crate) fn expand(&self, dx: f64, dy: f64) -> Self {
        Self {
            min_x: self.min_x - dx,
            min_y: self.min_y - dy,
            max_x: self.max_x + dx,
            max_y: self.max_y + dy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_bounds() {
        let b = Bounds::new(0.0, 0.0, 1000.0, 500.0).unwrap();
        assert_eq!(b.width(), 1000.0);
        assert_eq!(b.height(), 500.0);
        assert_eq!(b.center(), Point::new(500.0, 250.0));
        assert!(b.contains(Point::new(0.0, 500.0)));
        assert!(!b.contains(Point::new(-1.0, 10.0)));
    }

    #[test]
    fn test_degenerate_bounds_rejected() {
        assert!(Bounds::new(0.0, 0.0, 0.0, 10.0).is_err());
        assert!(Bounds::new(0.0, 10.0, 10.0, 5.0).is_err());
        assert!(Bounds::new(f64::NAN, 0.0, 1.0, 1.0).is_err());
        assert!(Bounds::new(0.0, 0.0, f64::INFINITY, 1.0).is_err());
    }

    #[test]
    fn test_around() {
        let b = Bounds::around(Point::new(100.0, 200.0), 50.0).unwrap();
        assert_eq!(b, Bounds::new(50.0, 150.0, 150.0, 250.0).unwrap());
        assert!(Bounds::around(Point::new(1.0, 1.0), 0.0).is_err());
    }

    #[test]
    fn test_expand() {
        let b = Bounds::new(0.0, 0.0, 10.0, 10.0).unwrap().expand(2.0, 3.0);
        assert_eq!((b.min_x, b.min_y, b.max_x, b.max_y), (-2.0, -3.0, 12.0, 13.0));
    }
}
