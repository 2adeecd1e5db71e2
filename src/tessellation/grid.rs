//! Lazy hexagon grid producer
//!
//! Rows are laid out bottom-to-top, hexagons left-to-right within a row.
//! Odd rows (counting from 1) start at the expanded left edge, even rows are
//! shifted right by half a hexagon width, which yields the brick-like tiling
//! where each row shares edges with the rows above and below.

use crate::cell::Cell;
use crate::error::Result;
use crate::tessellation::bounds::Bounds;
use crate::tessellation::layout::HexLayout;

/// A tessellation plan for one rectangle and radius
///
/// Holds only the layout and the expanded bounds; hexagons are produced on
/// demand by [`HexGrid::iter`]. Each call starts from the first hexagon, so
/// the sequence can be restarted any number of times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexGrid {
    layout: HexLayout,
    bounds: Bounds,
    expanded: Bounds,
}

impl HexGrid {
    /// Plan a tessellation of `bounds` with cells of the given radius
    ///
    /// The working area is grown by one hexagon width on x and one hexagon
    /// height on y on every side, so hexagons straddling the requested edges
    /// are still produced.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for a non-positive radius or for bounds that
    /// are not finite or have `min >= max` on either axis. The fields of
    /// `Bounds` are public, so bounds built as literals are checked here too.
    /// No hexagon is computed before validation passes.
    pub fn new(bounds: Bounds, radius: f64) -> Result<Self> {
        let bounds = Bounds::new(bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y)?;
        let layout = HexLayout::new(radius)?;
        let expanded = bounds.expand(layout.width(), layout.height());
        Ok(Self {
            layout,
            bounds,
            expanded,
        })
    }

    #[inline]
    pub fn layout(&self) -> &HexLayout {
        &self.layout
    }

    /// The rectangle requested by the caller
    #[inline]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// The rectangle actually tiled
    #[inline]
    pub fn expanded_bounds(&self) -> &Bounds {
        &self.expanded
    }

    /// Iterate the grid's cells in generation order
    pub fn iter(&self) -> HexCells {
        HexCells {
            grid: *self,
            row: 0,
            column: 0,
            next_id: 0,
        }
    }

    fn row_y(&self, row: usize) -> f64 {
        self.expanded.min_y + row as f64 * self.layout.row_step()
    }

    fn column_x(&self, row: usize, column: usize) -> f64 {
        // `row` is 0-based here, so 1-based even rows are the odd indices
        let offset = if row % 2 == 1 {
            self.layout.half_width()
        } else {
            0.0
        };
        self.expanded.min_x + offset + column as f64 * self.layout.width()
    }
}

impl<'a> IntoIterator for &'a HexGrid {
    type Item = Cell;
    type IntoIter = HexCells;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the cells of a [`HexGrid`]
///
/// Finite and deterministic: the same grid always yields the same cells
/// with the same site ids in the same order.
#[derive(Debug, Clone)]
pub struct HexCells {
    grid: HexGrid,
    row: usize,
    column: usize,
    next_id: usize,
}

impl Iterator for HexCells {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        loop {
            let y = self.grid.row_y(self.row);
            if y >= self.grid.expanded.max_y {
                return None;
            }

            let x = self.grid.column_x(self.row, self.column);
            if x >= self.grid.expanded.max_x {
                self.row += 1;
                self.column = 0;
                continue;
            }

            let cell = Cell::new(self.next_id, self.grid.layout.hexagon_at(x, y));
            self.column += 1;
            self.next_id += 1;
            return Some(cell);
        }
    }
}

impl std::iter::FusedIterator for HexCells {}
