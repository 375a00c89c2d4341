//! Boundary resolution for administrative regions
//!
//! This module provides:
//! - `GeodataClient` trait abstracting the upstream feature-query and
//!   map-export services
//! - `HttpGeodataClient` talking to the real services over HTTP
//! - `RegionResolver` turning a state/village name into a boundary feature

mod client;
mod resolver;
mod types;

pub use client::{GeodataClient, HttpGeodataClient};
pub use resolver::RegionResolver;
pub use types::{
    BoundaryQuery, ExportRequest, Feature, FeatureSet, Geometry, Predicate, RegionError,
    RegionLevel, Resolution, UpstreamErrorBody,
};
