//! Hexagon layout constants derived from a cell radius
//!
//! The radius is the distance from a hexagon centre to the middle of an
//! edge. For pointy-top hexagons this makes the half-width equal to the
//! radius and the side length (also the circumradius) `2r * tan(π/6)`.

use std::f64::consts::PI;

use crate::cell::{Hexagon, Point};
use crate::error::{HexCoverageError, Result};

/// Fixed offsets used to place hexagons on the grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexLayout {
    radius: f64,
    side_length: f64,
    half_side: f64,
    half_width: f64,
    width: f64,
    height: f64,
}

impl HexLayout {
    /// Derive the layout for a cell radius
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the radius is not finite or `<= 0`.
    pub fn new(radius: f64) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(HexCoverageError::InvalidConfig(format!(
                "cell radius must be positive and finite (got {})",
                radius
            )));
        }

        let side_length = 2.0 * radius * (PI / 6.0).tan();
        let half_side = side_length * 0.5;
        let half_width = side_length * 30f64.to_radians().cos();

        Ok(Self {
            radius,
            side_length,
            half_side,
            half_width,
            width: 2.0 * half_width,
            height: 2.0 * side_length,
        })
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Edge length, also the centre-to-corner distance
    #[inline]
    pub fn side_length(&self) -> f64 {
        self.side_length
    }

    #[inline]
    pub fn half_side(&self) -> f64 {
        self.half_side
    }

    /// Horizontal stagger between neighbouring rows
    #[inline]
    pub fn half_width(&self) -> f64 {
        self.half_width
    }

    /// Horizontal advance between hexagons in one row
    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Corner-to-corner height
    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Vertical advance between rows
    #[inline]
    pub fn row_step(&self) -> f64 {
        3.0 * self.half_side
    }

    /// Build the hexagon anchored at `(x, y)`
    ///
    /// The anchor is the lower-left corner of the hexagon's bounding box, so
    /// the bottom corner sits at `(x + b, y)` and the top one at `(x + b, y + h)`.
    pub fn hexagon_at(&self, x: f64, y: f64) -> Hexagon {
        let p = self.half_side;
        let b = self.half_width;
        let w = self.width;
        let h = self.height;

        Hexagon::from_corners([
            Point::new(x, y + p),
            Point::new(x, y + 3.0 * p),
            Point::new(x + b, y + h),
            Point::new(x + w, y + 3.0 * p),
            Point::new(x + w, y + p),
            Point::new(x + b, y),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_constants() {
        let layout = HexLayout::new(100.0).unwrap();
        assert!((layout.side_length() - 115.470_053_837_925_15).abs() < 1e-9);
        assert!((layout.half_width() - 100.0).abs() < 1e-9);
        assert!((layout.width() - 200.0).abs() < 1e-9);
        assert!((layout.height() - 230.940_107_675_850_3).abs() < 1e-9);
        assert!((layout.row_step() - 173.205_080_756_887_7).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_radius() {
        assert!(HexLayout::new(0.0).is_err());
        assert!(HexLayout::new(-10.0).is_err());
        assert!(HexLayout::new(f64::NAN).is_err());
        assert!(HexLayout::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_hexagon_at_geometry() {
        let layout = HexLayout::new(100.0).unwrap();
        let hex = layout.hexagon_at(10.0, 20.0);

        for length in hex.edge_lengths() {
            assert!((length - layout.side_length()).abs() < 1e-9);
        }

        let centroid = hex.centroid();
        assert!((centroid.x - 110.0).abs() < 1e-9);
        assert!((centroid.y - (20.0 + layout.side_length())).abs() < 1e-9);

        // Apothem equals the configured radius
        let left_edge_mid = (hex.vertices()[0] + hex.vertices()[1]) * 0.5;
        assert!((centroid.distance(left_edge_mid) - 100.0).abs() < 1e-9);
    }
}
