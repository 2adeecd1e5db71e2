//! Feature collections handed to an output writer
//!
//! Engine-agnostic, GeoJSON-shaped output: each feature is a geometry plus a
//! `site_id` property. Writers decide the persisted format.

use crate::cell::{Cell, Hexagon, Point};
use crate::error::BoxError;
use crate::site::{Site, SiteId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Feature geometry
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// A single position
    Point { coordinates: [f64; 2] },
    /// A polygon as a list of rings; only the exterior ring is ever produced
    Polygon { coordinates: Vec<Vec<[f64; 2]>> },
}

impl Geometry {
    pub fn point(p: Point) -> Self {
        Geometry::Point {
            coordinates: p.to_array(),
        }
    }

    /// Polygon geometry holding the hexagon's closed 7-vertex ring
    pub fn hexagon(hexagon: &Hexagon) -> Self {
        Geometry::Polygon {
            coordinates: vec![hexagon.vertices().iter().map(|v| v.to_array()).collect()],
        }
    }

    /// Geometry type name as written in GeoJSON
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point { .. } => "Point",
            Geometry::Polygon { .. } => "Polygon",
        }
    }
}

/// Feature properties
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Properties {
    pub site_id: SiteId,
}

/// A geometry with its properties
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename = "Feature"))]
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub geometry: Geometry,
    pub properties: Properties,
}

impl Feature {
    /// Point feature for a site
    pub fn site(site: &Site) -> Self {
        Self {
            geometry: Geometry::point(site.location),
            properties: Properties {
                site_id: site.site_id,
            },
        }
    }

    /// Polygon feature for a cell's coverage area, tagged with its site id
    pub fn cell_area(cell: &Cell) -> Self {
        Self {
            geometry: Geometry::hexagon(&cell.hexagon),
            properties: Properties {
                site_id: SiteId::Cell(cell.site_id),
            },
        }
    }
}

/// A named set of features sharing one coordinate reference system
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename = "FeatureCollection"))]
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureCollection {
    /// Layer name, used by writers as the output file stem
    pub name: String,

    /// CRS code of the coordinates (e.g. `EPSG:27700`)
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub crs: Option<String>,

    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(name: impl Into<String>, features: Vec<Feature>) -> Self {
        Self {
            name: name.into(),
            crs: None,
            features,
        }
    }

    /// Tag the collection with a CRS code
    pub fn with_crs(mut self, crs: impl Into<String>) -> Self {
        self.crs = Some(crs.into());
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Persists feature collections
///
/// Errors are returned boxed and surfaced to the caller unchanged.
pub trait FeatureWriter {
    fn write(&mut self, collection: &FeatureCollection) -> Result<(), BoxError>;
}

/// Keeps written collections in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryWriter {
    collections: Vec<FeatureCollection>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collections in the order they were written
    pub fn collections(&self) -> &[FeatureCollection] {
        &self.collections
    }

    /// Look up a written collection by name
    pub fn get(&self, name: &str) -> Option<&FeatureCollection> {
        self.collections.iter().find(|c| c.name == name)
    }
}

impl FeatureWriter for MemoryWriter {
    fn write(&mut self, collection: &FeatureCollection) -> Result<(), BoxError> {
        self.collections.push(collection.clone());
        Ok(())
    }
}

#[cfg(feature = "serde")]
pub use geojson::GeoJsonWriter;

#[cfg(feature = "serde")]
mod geojson {
    use std::fs::{self, File};
    use std::io::{BufWriter, Write};
    use std::path::{Path, PathBuf};

    use super::{FeatureCollection, FeatureWriter};
    use crate::config::PipelineConfig;
    use crate::error::BoxError;

    /// Writes each collection to `<dir>/<name>.geojson`
    ///
    /// The directory is created on first write if missing.
    #[derive(Debug, Clone)]
    pub struct GeoJsonWriter {
        dir: PathBuf,
    }

    impl GeoJsonWriter {
        pub fn new(dir: impl Into<PathBuf>) -> Self {
            Self { dir: dir.into() }
        }

        /// Writer targeting the configured `output_dir`
        pub fn from_config(config: &PipelineConfig) -> Self {
            Self::new(&config.output_dir)
        }

        pub fn dir(&self) -> &Path {
            &self.dir
        }

        /// Path a collection with this name is written to
        pub fn path_for(&self, name: &str) -> PathBuf {
            self.dir.join(format!("{}.geojson", name))
        }
    }

    impl FeatureWriter for GeoJsonWriter {
        fn write(&mut self, collection: &FeatureCollection) -> Result<(), BoxError> {
            fs::create_dir_all(&self.dir)?;
            let path = self.path_for(&collection.name);
            let mut out = BufWriter::new(File::create(&path)?);
            serde_json::to_writer_pretty(&mut out, collection)?;
            out.flush()?;

            log::debug!(
                "wrote {} features to {}",
                collection.len(),
                path.display()
            );
            Ok(())
        }
    }
}
