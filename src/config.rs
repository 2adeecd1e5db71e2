//! Pipeline Configuration and Builder
//!
//! All settings a pipeline run needs are passed in explicitly; nothing is
//! read from files or the environment.

use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{HexCoverageError, Result};
use crate::projection::WGS84;
use crate::selection::DEFAULT_INTERFERER_COUNT;

/// British National Grid, the default projected working system
pub const BRITISH_NATIONAL_GRID: &str = "EPSG:27700";

/// Upper bound on interferers: the first two rings around a hexagon
pub const MAX_INTERFERER_COUNT: usize = 18;

/// Configuration for coverage generation
///
/// # Example
///
/// ```rust
/// use rust_hex_coverage::*;
///
/// let config = PipelineConfigBuilder::new()
///     .target_crs("EPSG:32630")
///     .interferer_count(6)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(config.source_crs, "EPSG:4326");
/// # #[cfg(feature = "serde")]
/// # {
/// let json = serde_json::to_string(&config).unwrap();
/// let restored: PipelineConfig = serde_json::from_str(&json).unwrap();
/// assert_eq!(config, restored);
/// # }
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// CRS code of the unprojected transmitter input
    pub source_crs: String,

    /// CRS code of the projected working system (linear units)
    pub target_crs: String,

    /// Directory `Pipeline::write_geojson` writes the output collections to
    pub output_dir: PathBuf,

    /// Working region half-size as a multiple of the cell radius
    ///
    /// The transmitter point is buffered by `buffer_factor * radius` before
    /// tessellation. Default: 2.0.
    pub buffer_factor: f64,

    /// Number of interfering cells to select around the serving cell
    ///
    /// Default: 6 (one full ring).
    pub interferer_count: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_crs: WGS84.to_string(),
            target_crs: BRITISH_NATIONAL_GRID.to_string(),
            output_dir: PathBuf::from("intermediate").join("test_simulation"),
            buffer_factor: 2.0,
            interferer_count: DEFAULT_INTERFERER_COUNT,
        }
    }
}

/// Builder for creating PipelineConfig with validation
#[derive(Debug, Clone, Default)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - source_crs: `EPSG:4326`
    /// - target_crs: `EPSG:27700`
    /// - output_dir: `intermediate/test_simulation`
    /// - buffer_factor: 2.0
    /// - interferer_count: 6
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source_crs(mut self, crs: impl Into<String>) -> Self {
        self.config.source_crs = crs.into();
        self
    }

    pub fn target_crs(mut self, crs: impl Into<String>) -> Self {
        self.config.target_crs = crs.into();
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    /// Set the buffer multiplier
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the factor is not finite or `<= 0`
    pub fn buffer_factor(mut self, factor: f64) -> Result<Self> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(HexCoverageError::InvalidConfig(format!(
                "buffer factor must be positive (got {})",
                factor
            )));
        }
        self.config.buffer_factor = factor;
        Ok(self)
    }

    /// Set how many interferers to select
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if count is 0 or > 18
    pub fn interferer_count(mut self, count: usize) -> Result<Self> {
        if count == 0 || count > MAX_INTERFERER_COUNT {
            return Err(HexCoverageError::InvalidConfig(format!(
                "interferer count must be in 1..={} (got {})",
                MAX_INTERFERER_COUNT, count
            )));
        }
        self.config.interferer_count = count;
        Ok(self)
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if a CRS code is empty
    pub fn build(self) -> Result<PipelineConfig> {
        if self.config.source_crs.trim().is_empty() || self.config.target_crs.trim().is_empty() {
            return Err(HexCoverageError::InvalidConfig(
                "CRS codes must not be empty".to_string(),
            ));
        }
        Ok(self.config)
    }
}
