//! Landmask Server Library
//!
//! This module exports the server components for use in integration tests
//! and external tooling.

pub mod config;
pub mod geometry;
pub mod overlay;
pub mod region;

// Re-export commonly used types
pub use config::Config;
pub use overlay::{OverlayAppState, OverlayService, overlay_routes};
pub use region::{GeodataClient, HttpGeodataClient, RegionResolver};
