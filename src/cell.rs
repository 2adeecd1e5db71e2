//! Hexagon and Cell Structures
//!
//! Represents a single hexagonal coverage cell: the closed polygon ring, its
//! sequential site identifier and its centroid.

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point in a projected (linear-unit) coordinate system
pub type Point = DVec2;

/// Number of vertices in a closed hexagon ring (6 corners + closing vertex)
pub const RING_LEN: usize = 7;

/// A regular pointy-top hexagon stored as a closed ring
///
/// The first and last vertex are identical. Corners run clockwise starting at
/// the lower-left corner:
///
/// ```text
///        3
///     2     4
///     1     5
///        6
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hexagon {
    vertices: [Point; RING_LEN],
}

impl Hexagon {
    /// Build a hexagon from its six corners, closing the ring automatically
    pub fn from_corners(corners: [Point; 6]) -> Self {
        let mut vertices = [corners[0]; RING_LEN];
        vertices[..6].copy_from_slice(&corners);
        Self { vertices }
    }

    /// The closed ring (7 vertices, first == last)
    #[inline]
    pub fn vertices(&self) -> &[Point; RING_LEN] {
        &self.vertices
    }

    /// The six distinct corners
    #[inline]
    pub fn corners(&self) -> &[Point] {
        &self.vertices[..6]
    }

    /// Length of each of the six edges, in ring order
    pub fn edge_lengths(&self) -> [f64; 6] {
        let mut lengths = [0.0; 6];
        for (i, pair) in self.vertices.windows(2).enumerate() {
            lengths[i] = pair[0].distance(pair[1]);
        }
        lengths
    }

    /// Signed shoelace area (negative for the clockwise rings produced by tessellation)
    pub fn signed_area(&self) -> f64 {
        self.vertices
            .windows(2)
            .map(|pair| pair[0].perp_dot(pair[1]))
            .sum::<f64>()
            * 0.5
    }

    /// Absolute polygon area
    #[inline]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Polygon centroid (centre of mass of the enclosed area)
    ///
    /// Uses the shoelace centroid formula rather than the vertex average, so
    /// it stays correct for any simple ring, not only regular ones. Falls back
    /// to the corner average for a degenerate (zero-area) ring.
    pub fn centroid(&self) -> Point {
        let area = self.signed_area();
        if area.abs() <= f64::EPSILON {
            return self.corners().iter().copied().sum::<Point>() / 6.0;
        }

        // Shift to the first corner to keep the cross products small
        let origin = self.vertices[0];
        let mut acc = Point::ZERO;
        for pair in self.vertices.windows(2) {
            let a = pair[0] - origin;
            let b = pair[1] - origin;
            acc += (a + b) * a.perp_dot(b);
        }

        origin + acc / (6.0 * area)
    }

    /// Check whether a point lies inside or on the boundary of the hexagon
    pub fn contains(&self, point: Point) -> bool {
        let scale = self.vertices[0].distance_squared(self.vertices[1]);
        let tolerance = scale * 1e-9;

        let mut has_pos = false;
        let mut has_neg = false;
        for pair in self.vertices.windows(2) {
            let cross = (pair[1] - pair[0]).perp_dot(point - pair[0]);
            if cross > tolerance {
                has_pos = true;
            } else if cross < -tolerance {
                has_neg = true;
            }
            if has_pos && has_neg {
                return false;
            }
        }
        true
    }
}

/// A single coverage cell produced by tessellation
///
/// The site identifier is unique within one tessellation run and follows
/// generation order (row-major, bottom-to-top, left-to-right). The centroid
/// is computed once when the cell is created.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Sequential site identifier (0, 1, 2, ...)
    pub site_id: usize,

    /// Cell footprint
    pub hexagon: Hexagon,

    /// Geometric centre of the hexagon
    pub centroid: Point,
}

impl Cell {
    /// Create a new cell, deriving its centroid from the hexagon
    pub fn new(site_id: usize, hexagon: Hexagon) -> Self {
        Self {
            site_id,
            centroid: hexagon.centroid(),
            hexagon,
        }
    }

    /// Euclidean distance between this cell's centroid and a point
    #[inline]
    pub fn distance_to(&self, point: Point) -> f64 {
        self.centroid.distance(point)
    }
}
