//! Server configuration
//!
//! Configuration is loaded from environment variables; every field has a
//! dev-friendly default.

use std::env;
use std::time::Duration;

/// Main server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address
    pub host: String,
    /// Server port
    pub port: u16,

    /// Upstream service configuration
    pub upstream: UpstreamConfig,

    /// Attribute field names on the boundary layer
    pub fields: FieldConfig,

    /// Overlay rendering configuration
    pub overlay: OverlayConfig,
}

/// Upstream query/export service configuration
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Feature-query endpoint (Esri-JSON `query` operation)
    pub query_url: String,
    /// Map-export endpoint (`export` operation)
    pub export_url: String,
    /// Layer selector passed to the export service
    pub export_layers: String,
    /// Timeout applied to every outbound request
    pub timeout: Duration,
}

/// Attribute field names used when building boundary filters
#[derive(Debug, Clone)]
pub struct FieldConfig {
    pub state_field: String,
    pub village_field: String,
}

/// Overlay rendering configuration
#[derive(Debug, Clone)]
pub struct OverlayConfig {
    /// Padding factor applied to the boundary extent
    pub padding_factor: f64,
    /// Default longer-side pixel size when the request carries none
    pub default_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            upstream: UpstreamConfig::default(),
            fields: FieldConfig::default(),
            overlay: OverlayConfig::default(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            query_url: "https://bhuvan.example.org/boundaries/MapServer/0/query".to_string(),
            export_url: "https://bhuvan.example.org/landcover/MapServer/export".to_string(),
            export_layers: "show:0".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            state_field: "stname".to_string(),
            village_field: "vilname".to_string(),
        }
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            padding_factor: 1.06,
            default_size: 1024,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        // Server config
        if let Ok(host) = env::var("HOST") {
            config.host = host;
        }
        if let Ok(port) = env::var("PORT")
            && let Ok(p) = port.parse()
        {
            config.port = p;
        }

        // Upstream config
        if let Ok(url) = env::var("BOUNDARY_QUERY_URL") {
            config.upstream.query_url = url;
        }
        if let Ok(url) = env::var("RASTER_EXPORT_URL") {
            config.upstream.export_url = url;
        }
        if let Ok(layers) = env::var("EXPORT_LAYERS") {
            config.upstream.export_layers = layers;
        }
        if let Ok(val) = env::var("UPSTREAM_TIMEOUT_SECS")
            && let Ok(secs) = val.parse::<u64>()
        {
            config.upstream.timeout = Duration::from_secs(secs);
        }

        // Field config
        if let Ok(field) = env::var("STATE_FIELD") {
            config.fields.state_field = field;
        }
        if let Ok(field) = env::var("VILLAGE_FIELD") {
            config.fields.village_field = field;
        }

        // Overlay config
        if let Ok(val) = env::var("PADDING_FACTOR")
            && let Ok(f) = val.parse::<f64>()
            && f >= 1.0
        {
            config.overlay.padding_factor = f;
        }
        if let Ok(val) = env::var("DEFAULT_SIZE")
            && let Ok(size) = val.parse()
        {
            config.overlay.default_size = size;
        }

        config
    }
}
