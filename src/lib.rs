//! Hexagonal cell-coverage geometry for radio-network simulation
//!
//! Given a transmitter location and a cell radius, tessellates the
//! surrounding region with regular hexagons, picks the hexagon serving the
//! transmitter and the six nearest hexagons as interfering cells, and turns
//! them into site points and coverage polygons.
//!
//! # Quick Start
//!
//! ```rust
//! use rust_hex_coverage::*;
//!
//! let config = PipelineConfigBuilder::new()
//!     .target_crs("LOCAL")
//!     .build()
//!     .unwrap();
//!
//! // Crystal Palace transmitter, longitude/latitude
//! let tower = Point::new(-0.0728, 51.4243);
//! let pipeline = Pipeline::new(config, LocalTangentPlane::new(tower));
//!
//! let output = pipeline.run(tower, 750.0).unwrap();
//! println!(
//!     "serving cell {} with {} interferers",
//!     output.serving_cell_area.site_id,
//!     output.interfering_sites.len()
//! );
//!
//! let mut writer = MemoryWriter::new();
//! pipeline.write(&output, &mut writer).unwrap();
//! assert_eq!(writer.collections().len(), 4);
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): KD-tree backed nearest-centroid lookups
//! - `serde`: Serialization for configuration and geometry, plus a GeoJSON writer

// Modules
pub mod error;
pub mod config;
pub mod cell;
pub mod tessellation;
pub mod spatial;
pub mod selection;
pub mod site;
pub mod features;
pub mod projection;
pub mod pipeline;

// Re-export core types for convenience
pub use error::{BoxError, HexCoverageError, Result};
pub use config::{PipelineConfig, PipelineConfigBuilder};
pub use cell::{Cell, Hexagon, Point};
pub use tessellation::{tessellate, Bounds, HexGrid, HexLayout};
pub use spatial::{BruteForceIndex, DefaultIndex, Neighbor, SpatialIndex};
pub use selection::{CellSelector, Selection};
pub use site::{Site, SiteId, SiteLocator};
pub use features::{Feature, FeatureCollection, FeatureWriter, Geometry, MemoryWriter};
pub use projection::{IdentityReprojector, LocalTangentPlane, Reprojector};
pub use pipeline::{CoverageOutput, Pipeline};

#[cfg(feature = "spatial-index")]
pub use spatial::KdTreeIndex;

#[cfg(feature = "serde")]
pub use features::GeoJsonWriter;
