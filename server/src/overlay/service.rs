//! Overlay compositor
//!
//! One sequential pass per request: resolve the boundary, pad its extent,
//! fetch a clipped land-cover raster, rasterize the boundary mask, and apply
//! destination-in compositing before encoding the result.

use image::{ImageFormat, RgbaImage};
use std::io::Cursor;
use std::sync::Arc;
use tracing::debug;

use super::mask::rings_to_mask;
use super::types::{OverlayError, RenderedOverlay};
use crate::config::{FieldConfig, OverlayConfig};
use crate::geometry::{Extent, GeoBounds};
use crate::region::{BoundaryQuery, ExportRequest, GeodataClient, RegionResolver, Resolution};

/// Hard limits on the requested longer-side pixel size.
const MIN_SIZE: u32 = 128;
const MAX_SIZE: u32 = 4096;

/// Orchestrates the resolve -> export -> mask -> composite pipeline.
pub struct OverlayService {
    client: Arc<dyn GeodataClient>,
    resolver: RegionResolver,
    config: OverlayConfig,
}

impl OverlayService {
    pub fn new(
        client: Arc<dyn GeodataClient>,
        fields: FieldConfig,
        config: OverlayConfig,
    ) -> Self {
        let resolver = RegionResolver::new(client.clone(), fields);
        Self {
            client,
            resolver,
            config,
        }
    }

    /// Default longer-side size when the request carries none.
    pub fn default_size(&self) -> u32 {
        self.config.default_size
    }

    /// Resolve a boundary feature without rendering anything.
    pub async fn resolve_region(
        &self,
        query: &BoundaryQuery,
    ) -> Result<Resolution, OverlayError> {
        if query.is_empty() {
            return Err(OverlayError::MissingRegion);
        }
        Ok(self.resolver.resolve(query).await?)
    }

    /// Build a boundary-masked land-cover overlay.
    pub async fn build_overlay(
        &self,
        query: &BoundaryQuery,
        size_hint: u32,
    ) -> Result<RenderedOverlay, OverlayError> {
        let resolution = self.resolve_region(query).await?;
        let rings = &resolution.feature.geometry.rings;

        let extent = Extent::from_rings(rings);
        if !extent.is_valid() || extent.width() <= 0.0 || extent.height() <= 0.0 {
            return Err(OverlayError::EmptyGeometry);
        }

        let padded = extent.expanded(self.config.padding_factor);
        let (width, height) = padded.size_for(size_hint.clamp(MIN_SIZE, MAX_SIZE));
        debug!(width, height, "rendering overlay for {}", query.label());

        let raster_bytes = self
            .client
            .export_raster(&ExportRequest {
                extent: padded,
                width,
                height,
            })
            .await?;

        let raster = image::load_from_memory(&raster_bytes)
            .map_err(|e| OverlayError::Decode(e.to_string()))?
            .to_rgba8();

        let mask = rings_to_mask(rings, width, height, &padded)?;
        let masked = apply_mask(raster, &mask);

        let mut png = Vec::new();
        masked
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| OverlayError::Encode(e.to_string()))?;

        Ok(RenderedOverlay {
            png,
            bounds: GeoBounds::from_extent(&padded),
            width,
            height,
        })
    }
}

/// Destination-in compositing: keep raster color, multiply alpha by the mask.
///
/// Pixels outside the mask's bounds (size-mismatched upstream responses) get
/// alpha 0.
fn apply_mask(mut raster: RgbaImage, mask: &tiny_skia::Pixmap) -> RgbaImage {
    for (x, y, pixel) in raster.enumerate_pixels_mut() {
        let mask_alpha = mask.pixel(x, y).map(|p| p.alpha()).unwrap_or(0);
        pixel.0[3] = ((pixel.0[3] as u16 * mask_alpha as u16) / 255) as u8;
    }
    raster
}
