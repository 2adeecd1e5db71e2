//! Hexagonal tessellation of a rectangular region
//!
//! Covers a rectangle with regular pointy-top hexagons of a given radius and
//! numbers them sequentially.

mod bounds;
mod grid;
mod layout;

pub use bounds::Bounds;
pub use grid::{HexCells, HexGrid};
pub use layout::HexLayout;

use crate::cell::Cell;
use crate::error::Result;

/// Tessellate a rectangle into hexagonal cells
///
/// Returns every cell of the grid in generation order (row-major,
/// bottom-to-top, left-to-right) with `site_id`s `0..n`.
///
/// # Errors
///
/// Returns `InvalidConfig` if `radius <= 0` or if `bounds` is not finite or
/// has `min >= max` on either axis.
///
/// # Example
///
/// ```rust
/// use rust_hex_coverage::tessellation::{tessellate, Bounds};
///
/// let bounds = Bounds::new(0.0, 0.0, 1000.0, 1000.0).unwrap();
/// let cells = tessellate(bounds, 100.0).unwrap();
/// assert!(cells.iter().all(|c| c.hexagon.vertices()[0] == c.hexagon.vertices()[6]));
/// ```
pub fn tessellate(bounds: Bounds, radius: f64) -> Result<Vec<Cell>> {
    let grid = HexGrid::new(bounds, radius)?;
    let cells: Vec<Cell> = grid.iter().collect();

    log::debug!(
        "tessellated {:.1} x {:.1} area with radius {} into {} cells",
        bounds.width(),
        bounds.height(),
        radius,
        cells.len()
    );

    Ok(cells)
}
