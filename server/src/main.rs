use std::net::SocketAddr;
use std::sync::Arc;

use landmask_server::config::Config;
use landmask_server::overlay::{OverlayAppState, OverlayService, overlay_routes};
use landmask_server::region::HttpGeodataClient;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "landmask=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = Config::from_env();
    info!(
        "Loaded configuration: host={}, port={}",
        config.host, config.port
    );
    info!("Boundary query service: {}", config.upstream.query_url);
    info!("Raster export service: {}", config.upstream.export_url);

    let client = Arc::new(
        HttpGeodataClient::new(config.upstream.clone())
            .map_err(|e| anyhow::anyhow!("Failed to initialize geodata client: {}", e))?,
    );
    let overlay_service = Arc::new(OverlayService::new(
        client,
        config.fields.clone(),
        config.overlay.clone(),
    ));

    let app_state = OverlayAppState { overlay_service };

    // Build CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = overlay_routes(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start the server
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Landmask server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
