//! Spatial indexing for nearest-centroid queries
//!
//! [`SpatialIndex`] is the seam between cell selection and the data
//! structure answering "k nearest to a point". Two implementations are
//! provided: a KD-tree (with the `spatial-index` feature) and a brute-force
//! scan that is always available and fine for the few dozen cells a single
//! transmitter produces.
//!
//! All implementations order results by ascending distance and break ties
//! by ascending position in the slice the index was built from.

#[cfg(feature = "spatial-index")]
use kiddo::immutable::float::kdtree::ImmutableKdTree;
#[cfg(feature = "spatial-index")]
use kiddo::SquaredEuclidean;

use crate::cell::Point;
use crate::error::{HexCoverageError, Result};

/// One query result: position in the indexed slice plus its squared distance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Index into the centroid slice the index was built from
    pub index: usize,
    /// Squared Euclidean distance to the query point
    pub distance_squared: f64,
}

impl Neighbor {
    #[inline]
    pub fn distance(&self) -> f64 {
        self.distance_squared.sqrt()
    }
}

/// Nearest-neighbour index over a fixed set of points
///
/// Indexes are immutable once built.
pub trait SpatialIndex: Sized {
    /// Build the index over `points`
    ///
    /// # Errors
    ///
    /// Returns `EmptyTessellation` if `points` is empty.
    fn build(points: &[Point]) -> Result<Self>;

    /// Number of indexed points
    fn len(&self) -> usize;

    /// Whether the index holds no points (never true for a built index)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Up to `k` nearest points to `query`, closest first
    fn nearest(&self, query: Point, k: usize) -> Vec<Neighbor>;
}

/// Order neighbours by distance, then by index, and keep the first `k`
fn rank(mut found: Vec<Neighbor>, k: usize) -> Vec<Neighbor> {
    found.sort_by(|a, b| {
        a.distance_squared
            .total_cmp(&b.distance_squared)
            .then(a.index.cmp(&b.index))
    });
    found.truncate(k);
    found
}

#[inline]
fn distance_squared(a: Point, b: Point) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

/// Rank every point against `query`
fn scan(points: &[Point], query: Point, k: usize) -> Vec<Neighbor> {
    let found = points
        .iter()
        .enumerate()
        .map(|(index, &p)| Neighbor {
            index,
            distance_squared: distance_squared(p, query),
        })
        .collect();
    rank(found, k)
}

/// Linear scan over all points
///
/// O(n) per query, no construction cost beyond copying the points.
#[derive(Debug, Clone)]
pub struct BruteForceIndex {
    points: Vec<Point>,
}

impl SpatialIndex for BruteForceIndex {
    fn build(points: &[Point]) -> Result<Self> {
        if points.is_empty() {
            return Err(HexCoverageError::EmptyTessellation);
        }
        Ok(Self {
            points: points.to_vec(),
        })
    }

    fn len(&self) -> usize {
        self.points.len()
    }

    fn nearest(&self, query: Point, k: usize) -> Vec<Neighbor> {
        // No point is nearest to a NaN or infinite query
        if k == 0 || !query.is_finite() {
            return Vec::new();
        }
        scan(&self.points, query, k)
    }
}

/// KD-tree backed index
///
/// # Performance
///
/// - Construction: O(n log n)
/// - Query: O(log n + m) where m is the number of points inside the final
///   search radius
///
/// A k-nearest query grows a search radius from the nearest hit until at
/// least `k` points fall inside it, then ranks those. Every point tied with
/// the k-th distance is therefore seen and tie-breaking stays deterministic.
#[cfg(feature = "spatial-index")]
#[derive(Clone)]
pub struct KdTreeIndex {
    tree: ImmutableKdTree<f64, usize, 2, 32>,
    points: Vec<Point>,
    spacing: f64,
}

#[cfg(feature = "spatial-index")]
impl KdTreeIndex {
    /// Index of the single nearest point
    ///
    /// Equidistant points are not tie-broken here; use
    /// [`SpatialIndex::nearest`] when that matters.
    pub fn find_nearest(&self, query: Point) -> usize {
        self.tree
            .nearest_one::<SquaredEuclidean>(&[query.x, query.y])
            .item
    }
}

#[cfg(feature = "spatial-index")]
impl SpatialIndex for KdTreeIndex {
    fn build(points: &[Point]) -> Result<Self> {
        if points.is_empty() {
            return Err(HexCoverageError::EmptyTessellation);
        }

        // Convert DVec2 to [f64; 2] array format for kiddo
        let coords: Vec<[f64; 2]> = points.iter().map(|p| [p.x, p.y]).collect();

        // Typical gap between points, used as the initial search radius
        let (min, max) = points
            .iter()
            .fold((points[0], points[0]), |(lo, hi), &p| (lo.min(p), hi.max(p)));
        let spacing = (max - min).length() / (points.len() as f64).sqrt();

        Ok(Self {
            tree: ImmutableKdTree::new_from_slice(&coords),
            points: points.to_vec(),
            spacing: if spacing > 0.0 { spacing } else { 1.0 },
        })
    }

    fn len(&self) -> usize {
        self.points.len()
    }

    fn nearest(&self, query: Point, k: usize) -> Vec<Neighbor> {
        // A non-finite query would never satisfy the radius search
        if k == 0 || !query.is_finite() {
            return Vec::new();
        }

        let q = [query.x, query.y];
        let k = k.min(self.points.len());
        let closest = self.tree.nearest_one::<SquaredEuclidean>(&q);
        let mut radius = closest.distance.sqrt().max(self.spacing);

        loop {
            // Squared distances overflowed; only a full scan can rank them
            if !(radius * radius).is_finite() {
                return scan(&self.points, query, k);
            }

            let found = self
                .tree
                .within_unsorted::<SquaredEuclidean>(&q, radius * radius);
            if found.len() >= k {
                // Recompute distances so ranking matches the brute-force scan bit for bit
                let found = found
                    .into_iter()
                    .map(|n| Neighbor {
                        index: n.item,
                        distance_squared: distance_squared(self.points[n.item], query),
                    })
                    .collect();
                return rank(found, k);
            }
            radius *= 2.0;
        }
    }
}

/// Index used when none is chosen explicitly
#[cfg(feature = "spatial-index")]
pub type DefaultIndex = KdTreeIndex;

/// Index used when none is chosen explicitly
#[cfg(not(feature = "spatial-index"))]
pub type DefaultIndex = BruteForceIndex;
