//! Coordinate geometry for boundary polygons
//!
//! This module provides:
//! - `Extent` for axis-aligned bounding boxes in projected (EPSG:3857) meters
//! - Inverse spherical Web Mercator projection
//! - `GeoBounds` for WGS84 degree bounds derived from an extent

mod extent;
mod projection;

pub use extent::Extent;
pub use projection::{GeoBounds, MAX_LATITUDE_DEG, mercator_to_lon_lat};
