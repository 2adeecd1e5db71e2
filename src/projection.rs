//! Coordinate reprojection
//!
//! The core works in projected, linear units. Turning a geographic input
//! into that system is delegated to a [`Reprojector`], so a real geodesy
//! library can be plugged in and tests can use simple stand-ins.

use std::fmt;

use crate::cell::Point;
use crate::error::BoxError;

/// CRS code for WGS84 longitude/latitude
pub const WGS84: &str = "EPSG:4326";

/// Mean Earth radius in metres
const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Converts a point between coordinate reference systems
pub trait Reprojector {
    /// Reproject `point` from `source_crs` into `target_crs`
    ///
    /// Points are `(x, y)`, i.e. `(longitude, latitude)` for geographic input.
    fn reproject(
        &self,
        point: Point,
        source_crs: &str,
        target_crs: &str,
    ) -> Result<Point, BoxError>;
}

impl<R: Reprojector + ?Sized> Reprojector for &R {
    fn reproject(
        &self,
        point: Point,
        source_crs: &str,
        target_crs: &str,
    ) -> Result<Point, BoxError> {
        (**self).reproject(point, source_crs, target_crs)
    }
}

/// Returned when a reprojector is asked for a conversion it cannot perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedCrs {
    pub source_crs: String,
    pub target_crs: String,
}

impl fmt::Display for UnsupportedCrs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unsupported reprojection from {} to {}",
            self.source_crs, self.target_crs
        )
    }
}

impl std::error::Error for UnsupportedCrs {}

/// Leaves coordinates untouched (input is already projected)
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityReprojector;

impl Reprojector for IdentityReprojector {
    fn reproject(
        &self,
        point: Point,
        _source_crs: &str,
        _target_crs: &str,
    ) -> Result<Point, BoxError> {
        Ok(point)
    }
}

/// Equirectangular projection onto a plane tangent at an origin
///
/// Maps WGS84 longitude/latitude to metres east/north of the origin. Accurate
/// to well under a percent over the few kilometres a cell layout spans, which
/// is enough for synthetic coverage geometry. Only accepts `EPSG:4326` input;
/// the target code is treated as a label for the local plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTangentPlane {
    origin: Point,
    cos_lat: f64,
}

impl LocalTangentPlane {
    /// Plane centred on `origin` (longitude, latitude in degrees)
    pub fn new(origin: Point) -> Self {
        Self {
            origin,
            cos_lat: origin.y.to_radians().cos(),
        }
    }

    #[inline]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Map projected metres back to longitude/latitude
    pub fn unproject(&self, point: Point) -> Point {
        Point::new(
            self.origin.x + (point.x / (EARTH_RADIUS_M * self.cos_lat)).to_degrees(),
            self.origin.y + (point.y / EARTH_RADIUS_M).to_degrees(),
        )
    }
}

impl Reprojector for LocalTangentPlane {
    fn reproject(
        &self,
        point: Point,
        source_crs: &str,
        target_crs: &str,
    ) -> Result<Point, BoxError> {
        if !source_crs.eq_ignore_ascii_case(WGS84) {
            return Err(Box::new(UnsupportedCrs {
                source_crs: source_crs.to_string(),
                target_crs: target_crs.to_string(),
            }));
        }

        let d_lon = (point.x - self.origin.x).to_radians();
        let d_lat = (point.y - self.origin.y).to_radians();
        Ok(Point::new(
            EARTH_RADIUS_M * d_lon * self.cos_lat,
            EARTH_RADIUS_M * d_lat,
        ))
    }
}
