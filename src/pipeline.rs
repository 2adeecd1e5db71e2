//! Coverage generation pipeline
//!
//! point → buffered region → hexagon set → index → selection → site points

use std::marker::PhantomData;

use crate::cell::{Cell, Point};
use crate::config::PipelineConfig;
use crate::error::{HexCoverageError, Result};
use crate::features::{Feature, FeatureCollection, FeatureWriter};
#[cfg(feature = "serde")]
use crate::features::GeoJsonWriter;
use crate::projection::Reprojector;
use crate::selection::CellSelector;
use crate::site::{Site, SiteLocator};
use crate::spatial::{DefaultIndex, SpatialIndex};
use crate::tessellation::{tessellate, Bounds};

/// Output collection names, in write order
pub const TRANSMITTER_LAYER: &str = "transmitter";
pub const INTERFERING_TRANSMITTERS_LAYER: &str = "interfering_transmitters";
pub const CELL_AREA_LAYER: &str = "cell_area";
pub const INTERFERING_CELL_AREAS_LAYER: &str = "interfering_cell_areas";

/// Everything one pipeline run produces
///
/// The interferer vectors hold fewer than the configured count only when
/// the tessellation was too small to supply them.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageOutput {
    /// Projected transmitter location the run was based on
    pub transmitter: Point,
    /// Serving cell's site, tagged `transmitter`
    pub serving_site: Site,
    /// Interfering sites, nearest first
    pub interfering_sites: Vec<Site>,
    /// Serving cell footprint
    pub serving_cell_area: Cell,
    /// Interfering cell footprints, same order as `interfering_sites`
    pub interfering_cell_areas: Vec<Cell>,
}

impl CoverageOutput {
    /// The four output collections, tagged with `crs`
    ///
    /// Order: transmitter, interfering transmitters, cell area, interfering
    /// cell areas.
    pub fn to_collections(&self, crs: &str) -> [FeatureCollection; 4] {
        [
            FeatureCollection::new(TRANSMITTER_LAYER, vec![Feature::site(&self.serving_site)]),
            FeatureCollection::new(
                INTERFERING_TRANSMITTERS_LAYER,
                self.interfering_sites.iter().map(Feature::site).collect(),
            ),
            FeatureCollection::new(
                CELL_AREA_LAYER,
                vec![Feature::cell_area(&self.serving_cell_area)],
            ),
            FeatureCollection::new(
                INTERFERING_CELL_AREAS_LAYER,
                self.interfering_cell_areas.iter().map(Feature::cell_area).collect(),
            ),
        ]
        .map(|c| c.with_crs(crs))
    }
}

/// Generates serving and interfering cells for one transmitter at a time
///
/// Holds no state between runs beyond its configuration and reprojector,
/// so separate transmitters can be processed concurrently with one
/// pipeline each (or a shared one, if the reprojector is `Sync`).
///
/// # Type Parameters
///
/// * `R` - Reprojector from the input CRS to the working CRS
/// * `I` - Spatial index used for selection (KD-tree by default)
///
/// # Example
///
/// ```
/// use rust_hex_coverage::*;
///
/// let pipeline = Pipeline::new(PipelineConfig::default(), IdentityReprojector);
/// let output = pipeline.run_projected(Point::new(533_000.0, 170_000.0), 750.0).unwrap();
///
/// assert_eq!(output.interfering_sites.len(), 6);
/// assert_eq!(output.serving_site.site_id, SiteId::Transmitter);
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline<R, I = DefaultIndex> {
    config: PipelineConfig,
    reprojector: R,
    selector: CellSelector,
    _index: PhantomData<fn() -> I>,
}

impl<R: Reprojector> Pipeline<R, DefaultIndex> {
    /// Create a pipeline using the default spatial index
    pub fn new(config: PipelineConfig, reprojector: R) -> Self {
        Self::with_index(config, reprojector)
    }
}

impl<R: Reprojector, I: SpatialIndex> Pipeline<R, I> {
    /// Create a pipeline with an explicitly chosen spatial index type
    pub fn with_index(config: PipelineConfig, reprojector: R) -> Self {
        let selector = CellSelector::new(config.interferer_count);
        Self {
            config,
            reprojector,
            selector,
            _index: PhantomData,
        }
    }

    #[inline]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Generate cells for a transmitter given in the source CRS
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` if `radius <= 0`
    /// - `Reprojection` carrying the reprojector's error unchanged
    pub fn run(&self, unprojected: Point, radius: f64) -> Result<CoverageOutput> {
        validate_radius(radius)?;

        let projected = self
            .reprojector
            .reproject(unprojected, &self.config.source_crs, &self.config.target_crs)
            .map_err(HexCoverageError::Reprojection)?;

        log::debug!(
            "reprojected ({}, {}) from {} to ({:.2}, {:.2}) in {}",
            unprojected.x,
            unprojected.y,
            self.config.source_crs,
            projected.x,
            projected.y,
            self.config.target_crs
        );

        self.run_projected(projected, radius)
    }

    /// Generate cells for a transmitter already in the working CRS
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `radius <= 0` or the transmitter
    /// coordinates are not finite.
    pub fn run_projected(&self, transmitter: Point, radius: f64) -> Result<CoverageOutput> {
        validate_radius(radius)?;

        let region = Bounds::around(transmitter, self.config.buffer_factor * radius)?;
        let cells = tessellate(region, radius)?;
        let selection = self.selector.select::<I>(&cells, transmitter)?;

        let locator = SiteLocator;
        let serving_site = locator.locate(selection.serving());
        let interfering_sites = locator.locate_many(selection.interferers().iter().copied());

        log::info!(
            "transmitter at ({:.1}, {:.1}) radius {}: serving cell {} of {}, {} interferers",
            transmitter.x,
            transmitter.y,
            radius,
            selection.serving().site_id,
            cells.len(),
            interfering_sites.len()
        );

        Ok(CoverageOutput {
            transmitter,
            serving_site,
            interfering_sites,
            serving_cell_area: selection.serving().clone(),
            interfering_cell_areas: selection
                .interferers()
                .iter()
                .map(|&c| c.clone())
                .collect(),
        })
    }

    /// Hand the four output collections to a writer
    ///
    /// Stops at the first failure and returns the writer's error unchanged
    /// inside `Write`.
    pub fn write<W: FeatureWriter>(&self, output: &CoverageOutput, writer: &mut W) -> Result<()> {
        for collection in output.to_collections(&self.config.target_crs) {
            writer
                .write(&collection)
                .map_err(HexCoverageError::Write)?;
        }
        Ok(())
    }

    /// Write the four collections as GeoJSON files under `output_dir`
    ///
    /// # Errors
    ///
    /// Returns `Write` if the directory or a file cannot be written.
    #[cfg(feature = "serde")]
    pub fn write_geojson(&self, output: &CoverageOutput) -> Result<()> {
        let mut writer = GeoJsonWriter::from_config(&self.config);
        self.write(output, &mut writer)
    }
}

fn validate_radius(radius: f64) -> Result<()> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(HexCoverageError::InvalidConfig(format!(
            "cell radius must be positive and finite (got {})",
            radius
        )));
    }
    Ok(())
}
