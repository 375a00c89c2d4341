//! Overlay rendering pipeline
//!
//! This module provides:
//! - `rings_to_mask` for rasterizing boundary polygons into an alpha stencil
//! - `OverlayService` orchestrating resolve -> export -> mask -> composite
//! - HTTP routes for the mask and overlay endpoints

mod mask;
pub mod routes;
mod service;
mod types;

pub use mask::rings_to_mask;
pub use routes::{OverlayAppState, overlay_routes};
pub use service::OverlayService;
pub use types::{OverlayError, OverlayFormat, RenderedOverlay};
