//! Common Test Utilities for Integration Tests
//!
//! Shared helpers used across integration test modules.

use async_trait::async_trait;
use axum::Router;
use bytes::Bytes;
use image::{ImageFormat, Rgba, RgbaImage};
use landmask_server::config::{FieldConfig, OverlayConfig};
use landmask_server::overlay::{OverlayAppState, OverlayService, overlay_routes};
use landmask_server::region::{
    ExportRequest, Feature, FeatureSet, GeodataClient, Geometry, RegionError,
};
use std::io::Cursor;
use std::sync::{Arc, Mutex};

/// Mock geodata client serving a fixed feature set and a solid-color raster.
///
/// Boundary queries that mention a village name return the village feature;
/// anything else returns the state feature. Queries containing "Zzzz" return
/// zero features.
pub struct MockGeodataClient {
    pub raster_color: Rgba<u8>,
    pub last_export: Mutex<Option<ExportRequest>>,
}

impl MockGeodataClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            raster_color: Rgba([40, 160, 60, 255]),
            last_export: Mutex::new(None),
        })
    }
}

/// A 500 km square in EPSG:3857 roughly over Odisha.
pub fn square_rings() -> Vec<Vec<[f64; 2]>> {
    vec![vec![
        [9_400_000.0, 2_200_000.0],
        [9_900_000.0, 2_200_000.0],
        [9_900_000.0, 2_700_000.0],
        [9_400_000.0, 2_700_000.0],
        [9_400_000.0, 2_200_000.0],
    ]]
}

fn feature_with_name(name: &str) -> Feature {
    let mut attributes = serde_json::Map::new();
    attributes.insert("name".to_string(), serde_json::Value::from(name));
    Feature {
        geometry: Geometry {
            rings: square_rings(),
        },
        attributes,
    }
}

#[async_trait]
impl GeodataClient for MockGeodataClient {
    async fn query_boundary(&self, where_clause: &str) -> Result<FeatureSet, RegionError> {
        if where_clause.contains("Zzzz") {
            return Ok(FeatureSet::default());
        }
        let name = if where_clause.contains("vilname") {
            "Angul"
        } else {
            "Odisha"
        };
        Ok(FeatureSet {
            features: vec![feature_with_name(name)],
            error: None,
        })
    }

    async fn export_raster(&self, request: &ExportRequest) -> Result<Bytes, RegionError> {
        *self.last_export.lock().unwrap() = Some(request.clone());

        let raster = RgbaImage::from_pixel(request.width, request.height, self.raster_color);
        let mut png = Vec::new();
        raster
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .expect("encode mock raster");
        Ok(Bytes::from(png))
    }
}

/// Create a test application router backed by the given mock client
pub fn create_test_app_with_client(client: Arc<MockGeodataClient>) -> Router {
    let overlay_service = Arc::new(OverlayService::new(
        client,
        FieldConfig::default(),
        OverlayConfig::default(),
    ));
    overlay_routes(OverlayAppState { overlay_service })
}

/// Create a test application router with a fresh mock client
pub fn create_test_app() -> Router {
    create_test_app_with_client(MockGeodataClient::new())
}
