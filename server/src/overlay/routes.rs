//! HTTP route handlers for the mask and overlay API

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::service::OverlayService;
use super::types::{OverlayError, OverlayFormat, OverlayJsonBody};
use crate::region::{BoundaryQuery, RegionError, Resolution};

/// Cache policy for successful overlay responses; edge caches carry the
/// caching burden, the service itself holds no cache.
const CACHE_CONTROL: &str = "public, max-age=3600, s-maxage=86400, stale-while-revalidate=600";

/// Application state containing the overlay service
#[derive(Clone)]
pub struct OverlayAppState {
    pub overlay_service: Arc<OverlayService>,
}

/// Error response for the overlay API
#[derive(Debug, Serialize)]
pub struct OverlayErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip)]
    status: StatusCode,
}

impl From<OverlayError> for OverlayErrorResponse {
    fn from(e: OverlayError) -> Self {
        match e {
            OverlayError::MissingRegion => Self {
                error: e.to_string(),
                details: None,
                status: StatusCode::BAD_REQUEST,
            },
            OverlayError::Region(RegionError::NotFound(_)) => Self {
                error: e.to_string(),
                details: None,
                status: StatusCode::NOT_FOUND,
            },
            OverlayError::Region(inner) => Self {
                error: "Upstream request failed".to_string(),
                details: Some(inner.to_string()),
                status: StatusCode::BAD_GATEWAY,
            },
            OverlayError::EmptyGeometry
            | OverlayError::Decode(_)
            | OverlayError::Encode(_)
            | OverlayError::Render(_) => Self {
                error: "Failed to build overlay".to_string(),
                details: Some(e.to_string()),
                status: StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for OverlayErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Query parameters shared by the mask and overlay endpoints
#[derive(Debug, Deserialize)]
pub struct OverlayParams {
    pub state: Option<String>,
    pub village: Option<String>,
    pub size: Option<u32>,
    #[serde(default)]
    pub format: OverlayFormat,
}

impl OverlayParams {
    fn boundary_query(&self) -> BoundaryQuery {
        BoundaryQuery {
            state: self.state.clone(),
            village: self.village.clone(),
        }
    }
}

/// GET /api/mask - Resolve a boundary without rendering
pub async fn get_mask(
    State(state): State<OverlayAppState>,
    Query(params): Query<OverlayParams>,
) -> Result<Json<Resolution>, OverlayErrorResponse> {
    let query = params.boundary_query();
    let resolution = state
        .overlay_service
        .resolve_region(&query)
        .await
        .map_err(|e| {
            tracing::warn!("Failed to resolve {}: {}", query.label(), e);
            OverlayErrorResponse::from(e)
        })?;

    Ok(Json(resolution))
}

/// GET /overlay, /api/overlay - Build a boundary-masked land-cover overlay
pub async fn get_overlay(
    State(state): State<OverlayAppState>,
    Query(params): Query<OverlayParams>,
) -> Result<Response, OverlayErrorResponse> {
    let query = params.boundary_query();
    let size_hint = params
        .size
        .unwrap_or_else(|| state.overlay_service.default_size());

    let overlay = state
        .overlay_service
        .build_overlay(&query, size_hint)
        .await
        .map_err(|e| {
            tracing::warn!("Failed to build overlay for {}: {}", query.label(), e);
            OverlayErrorResponse::from(e)
        })?;

    let mut headers = HeaderMap::new();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL));
    if let Ok(bounds) = HeaderValue::from_str(&overlay.bounds.to_header_value()) {
        headers.insert("x-bounds", bounds);
    }

    let response = match params.format {
        OverlayFormat::Json => {
            let body = OverlayJsonBody {
                image: format!("data:image/png;base64,{}", BASE64.encode(&overlay.png)),
                bounds: overlay.bounds,
                width: overlay.width,
                height: overlay.height,
            };
            (StatusCode::OK, headers, Json(body)).into_response()
        }
        OverlayFormat::Png => {
            headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("image/png"));
            (StatusCode::OK, headers, overlay.png).into_response()
        }
    };
    Ok(response)
}

/// Service descriptor returned from the root path
#[derive(Debug, Serialize)]
struct ServiceDescriptor {
    service: &'static str,
    version: &'static str,
    endpoints: Vec<EndpointDescriptor>,
}

#[derive(Debug, Serialize)]
struct EndpointDescriptor {
    path: &'static str,
    params: &'static str,
    description: &'static str,
}

/// GET / - List the available endpoints
pub async fn service_descriptor() -> Json<ServiceDescriptor> {
    Json(ServiceDescriptor {
        service: "landmask",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: vec![
            EndpointDescriptor {
                path: "/api/mask",
                params: "state?, village?",
                description: "Resolve a boundary feature and its level",
            },
            EndpointDescriptor {
                path: "/overlay",
                params: "state?, village?, size?, format? (png|json)",
                description: "Boundary-masked land-cover overlay",
            },
            EndpointDescriptor {
                path: "/api/overlay",
                params: "state?, village?, size?, format? (png|json)",
                description: "Alias of /overlay",
            },
        ],
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// GET /health - Liveness probe
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the overlay API routes
pub fn overlay_routes(state: OverlayAppState) -> Router {
    Router::new()
        .route("/", get(service_descriptor))
        .route("/health", get(health))
        .route("/api/mask", get(get_mask))
        .route("/overlay", get(get_overlay))
        .route("/api/overlay", get(get_overlay))
        .with_state(state)
}
