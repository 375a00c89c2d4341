//! Overlay types and error definitions

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::GeoBounds;
use crate::region::RegionError;

/// Errors that can occur while building an overlay
#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("Provide state and/or village")]
    MissingRegion,

    #[error(transparent)]
    Region(#[from] RegionError),

    #[error("Boundary geometry is empty")]
    EmptyGeometry,

    #[error("Failed to decode exported raster: {0}")]
    Decode(String),

    #[error("Failed to encode overlay image: {0}")]
    Encode(String),

    #[error("Mask rendering failed: {0}")]
    Render(String),
}

/// Requested response encoding for the overlay endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayFormat {
    #[default]
    Png,
    Json,
}

/// A fully rendered, boundary-masked overlay
#[derive(Debug, Clone)]
pub struct RenderedOverlay {
    /// Encoded PNG bytes
    pub png: Vec<u8>,
    /// WGS84 bounds of the padded extent
    pub bounds: GeoBounds,
    pub width: u32,
    pub height: u32,
}

/// JSON body for `format=json` overlay responses
#[derive(Debug, Serialize)]
pub struct OverlayJsonBody {
    /// `data:image/png;base64,...` URL
    pub image: String,
    /// `[west, south, east, north]` degrees
    pub bounds: GeoBounds,
    pub width: u32,
    pub height: u32,
}
