//! Upstream geodata clients
//!
//! `GeodataClient` abstracts the two remote services the pipeline depends on
//! (feature query and raster export) so tests can inject mocks.

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, warn};

use super::types::{ExportRequest, FeatureSet, RegionError};
use crate::config::UpstreamConfig;

/// Trait for the upstream spatial services
#[async_trait]
pub trait GeodataClient: Send + Sync {
    /// Run a boundary query and return the parsed feature set.
    async fn query_boundary(&self, where_clause: &str) -> Result<FeatureSet, RegionError>;

    /// Fetch a clipped land-cover raster as encoded image bytes.
    async fn export_raster(&self, request: &ExportRequest) -> Result<Bytes, RegionError>;
}

/// HTTP implementation talking to the real query/export services.
pub struct HttpGeodataClient {
    client: reqwest::Client,
    config: UpstreamConfig,
}

impl HttpGeodataClient {
    /// Build a client with the configured per-request timeout.
    ///
    /// The timeout covers connect plus body read; a hung upstream fails the
    /// request instead of hanging it.
    pub fn new(config: UpstreamConfig) -> Result<Self, RegionError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RegionError::Upstream(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl GeodataClient for HttpGeodataClient {
    async fn query_boundary(&self, where_clause: &str) -> Result<FeatureSet, RegionError> {
        debug!(where_clause, "boundary query");

        let response = self
            .client
            .get(&self.config.query_url)
            .query(&[
                ("where", where_clause),
                ("outFields", "*"),
                ("returnGeometry", "true"),
                ("outSR", "3857"),
                ("resultRecordCount", "1"),
                ("f", "json"),
            ])
            .send()
            .await
            .map_err(|e| RegionError::Upstream(format!("Boundary query failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "boundary query error status");
            return Err(RegionError::Upstream(format!(
                "Boundary service returned HTTP {}",
                status
            )));
        }

        let set: FeatureSet = response
            .json()
            .await
            .map_err(|e| RegionError::Malformed(format!("Invalid feature JSON: {}", e)))?;

        if let Some(ref error) = set.error {
            return Err(RegionError::UpstreamPayload(error.describe()));
        }
        Ok(set)
    }

    async fn export_raster(&self, request: &ExportRequest) -> Result<Bytes, RegionError> {
        let e = &request.extent;
        let bbox = format!("{},{},{},{}", e.xmin, e.ymin, e.xmax, e.ymax);
        let size = format!("{},{}", request.width, request.height);
        debug!(%bbox, %size, "raster export");

        let response = self
            .client
            .get(&self.config.export_url)
            .query(&[
                ("bbox", bbox.as_str()),
                ("bboxSR", "3857"),
                ("imageSR", "3857"),
                ("size", size.as_str()),
                ("format", "png32"),
                ("transparent", "true"),
                ("dpi", "96"),
                ("layers", self.config.export_layers.as_str()),
                ("f", "image"),
            ])
            .send()
            .await
            .map_err(|e| RegionError::Upstream(format!("Raster export failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "raster export error status");
            return Err(RegionError::Upstream(format!(
                "Export service returned HTTP {}",
                status
            )));
        }

        response
            .bytes()
            .await
            .map_err(|e| RegionError::Upstream(format!("Failed to read export body: {}", e)))
    }
}
