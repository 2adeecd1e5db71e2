//! Serving and interfering cell selection
//!
//! The serving cell is the cell whose centroid is nearest the transmitter.
//! Interferers are the cells nearest the serving cell's centroid, excluding
//! the serving cell itself.

use crate::cell::{Cell, Point};
use crate::error::{HexCoverageError, Result};
use crate::spatial::SpatialIndex;

/// Number of interferers in a full first ring around a hexagonal cell
pub const DEFAULT_INTERFERER_COUNT: usize = 6;

/// Roles assigned to existing cells
///
/// Borrows the tessellated cells; no geometry is copied.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'a> {
    serving: &'a Cell,
    interferers: Vec<&'a Cell>,
    requested: usize,
}

impl<'a> Selection<'a> {
    /// The cell serving the transmitter
    #[inline]
    pub fn serving(&self) -> &'a Cell {
        self.serving
    }

    /// Interfering cells, nearest first
    #[inline]
    pub fn interferers(&self) -> &[&'a Cell] {
        &self.interferers
    }

    /// How many interferers were requested but not available
    #[inline]
    pub fn shortfall(&self) -> usize {
        self.requested - self.interferers.len()
    }

    /// Whether every requested interferer was found
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.shortfall() == 0
    }
}

/// Picks the serving cell and its interferers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSelector {
    interferer_count: usize,
}

impl CellSelector {
    pub fn new(interferer_count: usize) -> Self {
        Self { interferer_count }
    }

    #[inline]
    pub fn interferer_count(&self) -> usize {
        self.interferer_count
    }

    /// Select the serving cell and interferers for a transmitter location
    ///
    /// Builds a fresh index of type `I` over the cell centroids. If fewer
    /// than `interferer_count + 1` cells exist, the selection holds as many
    /// interferers as are available and a warning is logged.
    ///
    /// # Errors
    ///
    /// Returns `EmptyTessellation` if `cells` is empty.
    pub fn select<'a, I: SpatialIndex>(
        &self,
        cells: &'a [Cell],
        transmitter: Point,
    ) -> Result<Selection<'a>> {
        let centroids: Vec<Point> = cells.iter().map(|c| c.centroid).collect();
        let index = I::build(&centroids)?;
        self.select_with(&index, cells, transmitter)
    }

    /// Select using an index already built over `cells`' centroids
    ///
    /// The index positions must correspond to positions in `cells`.
    pub fn select_with<'a, I: SpatialIndex>(
        &self,
        index: &I,
        cells: &'a [Cell],
        transmitter: Point,
    ) -> Result<Selection<'a>> {
        let serving = index
            .nearest(transmitter, 1)
            .first()
            .and_then(|n| cells.get(n.index))
            .ok_or(HexCoverageError::EmptyTessellation)?;

        // First hit is the serving cell itself (distance zero)
        let interferers: Vec<&Cell> = index
            .nearest(serving.centroid, self.interferer_count.saturating_add(1))
            .into_iter()
            .filter_map(|n| cells.get(n.index))
            .filter(|c| c.site_id != serving.site_id)
            .take(self.interferer_count)
            .collect();

        log::trace!(
            "serving cell {} at ({:.1}, {:.1}), interferers {:?}",
            serving.site_id,
            serving.centroid.x,
            serving.centroid.y,
            interferers.iter().map(|c| c.site_id).collect::<Vec<_>>()
        );

        if interferers.len() < self.interferer_count {
            log::warn!(
                "insufficient interferers: found {} of {} around serving cell {}",
                interferers.len(),
                self.interferer_count,
                serving.site_id
            );
        }

        Ok(Selection {
            serving,
            interferers,
            requested: self.interferer_count,
        })
    }
}

impl Default for CellSelector {
    fn default() -> Self {
        Self::new(DEFAULT_INTERFERER_COUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::BruteForceIndex;
    use crate::tessellation::{tessellate, Bounds, HexGrid};

    fn square_cells() -> Vec<Cell> {
        tessellate(Bounds::new(0.0, 0.0, 1000.0, 1000.0).unwrap(), 100.0).unwrap()
    }

    fn check_serving_is_nearest<I: SpatialIndex>() {
        let cells = square_cells();
        let tx = Point::new(500.0, 500.0);
        let selection = CellSelector::default().select::<I>(&cells, tx).unwrap();

        let best = cells
            .iter()
            .map(|c| c.distance_to(tx))
            .fold(f64::INFINITY, f64::min);
        let serving = selection.serving();
        assert_eq!(serving.distance_to(tx), best);
        assert!(serving.hexagon.contains(tx));

        // Lowest site id among equally near cells
        for c in &cells {
            if c.distance_to(tx) == best {
                assert!(serving.site_id <= c.site_id);
            }
        }
    }

    fn check_interferers_ring<I: SpatialIndex>() {
        let cells = square_cells();
        let tx = Point::new(500.0, 500.0);
        let selection = CellSelector::default().select::<I>(&cells, tx).unwrap();
        let serving = selection.serving();

        assert_eq!(selection.interferers().len(), 6);
        assert!(selection.is_complete());

        let mut last = 0.0;
        for cell in selection.interferers() {
            assert_ne!(cell.site_id, serving.site_id);
            let d = cell.centroid.distance(serving.centroid);
            assert!(d > 0.0);
            assert!(d >= last);
            // First ring sits exactly one cell width (2r) away
            assert!((d - 200.0).abs() < 1e-6);
            last = d;
        }
    }

    #[test]
    fn test_brute_force_selection() {
        check_serving_is_nearest::<BruteForceIndex>();
        check_interferers_ring::<BruteForceIndex>();
    }

    #[cfg(feature = "spatial-index")]
    #[test]
    fn test_kdtree_selection() {
        use crate::spatial::KdTreeIndex;
        check_serving_is_nearest::<KdTreeIndex>();
        check_interferers_ring::<KdTreeIndex>();
    }

    #[cfg(feature = "spatial-index")]
    #[test]
    fn test_backends_agree() {
        use crate::spatial::KdTreeIndex;
        let cells = square_cells();
        for tx in [
            Point::new(500.0, 500.0),
            Point::new(13.0, 987.0),
            Point::new(-40.0, 220.0),
        ] {
            let a = CellSelector::default().select::<KdTreeIndex>(&cells, tx).unwrap();
            let b = CellSelector::default().select::<BruteForceIndex>(&cells, tx).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_four_cells_yield_three_interferers() {
        let grid = HexGrid::new(Bounds::new(0.0, 0.0, 1000.0, 1000.0).unwrap(), 100.0).unwrap();
        let cells: Vec<Cell> = grid.iter().take(4).collect();

        let selection = CellSelector::default()
            .select::<BruteForceIndex>(&cells, cells[1].centroid)
            .unwrap();

        assert_eq!(selection.serving().site_id, 1);
        assert_eq!(selection.interferers().len(), 3);
        assert_eq!(selection.shortfall(), 3);
        assert!(!selection.is_complete());
    }

    #[test]
    fn test_single_cell_has_no_interferers() {
        let cells: Vec<Cell> = square_cells().into_iter().take(1).collect();
        let selection = CellSelector::default()
            .select::<BruteForceIndex>(&cells, Point::new(-1e6, -1e6))
            .unwrap();
        assert_eq!(selection.serving().site_id, 0);
        assert!(selection.interferers().is_empty());
    }

    #[test]
    fn test_interferer_count_formula() {
        let all = square_cells();
        for total in 1..12 {
            let cells = &all[..total];
            let selection = CellSelector::default()
                .select::<BruteForceIndex>(cells, Point::new(300.0, 0.0))
                .unwrap();
            assert_eq!(selection.interferers().len(), 6.min(total - 1));
        }
    }

    #[test]
    fn test_empty_cells_rejected() {
        let result = CellSelector::default().select::<BruteForceIndex>(&[], Point::ZERO);
        assert!(matches!(result, Err(HexCoverageError::EmptyTessellation)));
    }

    #[test]
    fn test_ties_resolved_by_site_id() {
        let layout = crate::tessellation::HexLayout::new(1.0).unwrap();
        let hexagon = layout.hexagon_at(0.0, 0.0);
        let at = |site_id, x, y| Cell {
            site_id,
            hexagon,
            centroid: Point::new(x, y),
        };
        let cells = vec![
            at(0, 2.0, 0.0),
            at(1, -2.0, 0.0),
            at(2, 0.0, 2.0),
            at(3, 0.0, -2.0),
            at(4, 2.0, 4.0),
        ];

        let selection = CellSelector::new(2)
            .select::<BruteForceIndex>(&cells, Point::ZERO)
            .unwrap();
        assert_eq!(selection.serving().site_id, 0);

        // Around (2, 0): cells 2 and 3 tie at sqrt(8), cells 1 and 4 are farther
        let ids: Vec<usize> = selection.interferers().iter().map(|c| c.site_id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_unbounded_interferer_count() {
        let cells = square_cells();
        let selection = CellSelector::new(usize::MAX)
            .select::<BruteForceIndex>(&cells, Point::new(500.0, 500.0))
            .unwrap();

        // Every other cell becomes an interferer and the gap is reported
        assert_eq!(selection.interferers().len(), cells.len() - 1);
        assert_eq!(selection.shortfall(), usize::MAX - (cells.len() - 1));
        assert!(!selection.is_complete());
    }

    #[test]
    fn test_non_finite_transmitter_rejected() {
        let cells = square_cells();
        let result =
            CellSelector::default().select::<BruteForceIndex>(&cells, Point::new(f64::NAN, 0.0));
        assert!(matches!(result, Err(HexCoverageError::EmptyTessellation)));
    }

    #[test]
    fn test_determinism() {
        let cells = square_cells();
        let tx = Point::new(512.5, 487.25);
        let first = CellSelector::default().select::<BruteForceIndex>(&cells, tx).unwrap();
        let ids: Vec<usize> = first.interferers().iter().map(|c| c.site_id).collect();
        for _ in 0..5 {
            let again = CellSelector::default().select::<BruteForceIndex>(&cells, tx).unwrap();
            let again_ids: Vec<usize> = again.interferers().iter().map(|c| c.site_id).collect();
            assert_eq!(ids, again_ids);
        }
    }
}
