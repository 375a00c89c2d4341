//! Inverse spherical Web Mercator (EPSG:3857 -> EPSG:4326)

use serde::Serialize;
use std::f64::consts::FRAC_PI_2;

use super::Extent;

/// Sphere radius of the Web Mercator projection, meters.
const EARTH_RADIUS_M: f64 = 6378137.0;

/// Latitude limit of the projection, degrees.
pub const MAX_LATITUDE_DEG: f64 = 85.05112878;

/// Convert a Web Mercator point to longitude/latitude degrees.
///
/// Longitude is linear in x; latitude is the inverse Gudermannian of y/R,
/// clamped to the projection's defined limit.
pub fn mercator_to_lon_lat(x: f64, y: f64) -> (f64, f64) {
    let lon = (x / EARTH_RADIUS_M).to_degrees();
    let lat = (2.0 * (y / EARTH_RADIUS_M).exp().atan() - FRAC_PI_2).to_degrees();
    (lon, lat.clamp(-MAX_LATITUDE_DEG, MAX_LATITUDE_DEG))
}

/// WGS84 degree bounds, serialized as `[west, south, east, north]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl GeoBounds {
    pub fn from_extent(extent: &Extent) -> Self {
        let (west, south) = mercator_to_lon_lat(extent.xmin, extent.ymin);
        let (east, north) = mercator_to_lon_lat(extent.xmax, extent.ymax);
        Self {
            west,
            south,
            east,
            north,
        }
    }

    pub fn to_array(self) -> [f64; 4] {
        [self.west, self.south, self.east, self.north]
    }

    /// Comma-separated `w,s,e,n` for the `X-Bounds` response header.
    pub fn to_header_value(self) -> String {
        format!("{},{},{},{}", self.west, self.south, self.east, self.north)
    }
}

impl Serialize for GeoBounds {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_array().serialize(serializer)
    }
}
