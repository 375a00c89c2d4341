//! Polygon-to-alpha-stencil rasterization

use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Shader, Transform};

use super::types::OverlayError;
use crate::geometry::Extent;

/// Rasterize boundary rings into a `width x height` alpha stencil.
///
/// Extent coordinates map to pixels with independent x/y scale factors; the
/// vertical axis is flipped (projected y grows upward, image rows downward).
/// Rings are filled opaque with the even-odd rule so inner rings render as
/// holes.
pub fn rings_to_mask(
    rings: &[Vec<[f64; 2]>],
    width: u32,
    height: u32,
    extent: &Extent,
) -> Result<Pixmap, OverlayError> {
    if width == 0 || height == 0 {
        return Err(OverlayError::Render(format!(
            "invalid mask size {}x{}",
            width, height
        )));
    }
    if !extent.is_valid() || extent.width() <= 0.0 || extent.height() <= 0.0 {
        return Err(OverlayError::Render("degenerate mask extent".to_string()));
    }

    let sx = width as f64 / extent.width();
    let sy = height as f64 / extent.height();

    let mut builder = PathBuilder::new();
    for ring in rings {
        if ring.len() < 3 {
            continue;
        }
        let [x0, y0] = ring[0];
        builder.move_to(
            ((x0 - extent.xmin) * sx) as f32,
            ((extent.ymax - y0) * sy) as f32,
        );
        for &[x, y] in &ring[1..] {
            builder.line_to(
                ((x - extent.xmin) * sx) as f32,
                ((extent.ymax - y) * sy) as f32,
            );
        }
        builder.close();
    }

    let path = builder
        .finish()
        .ok_or_else(|| OverlayError::Render("boundary produced no drawable path".to_string()))?;

    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| OverlayError::Render("mask pixmap allocation failed".to_string()))?;

    let paint = Paint {
        shader: Shader::SolidColor(Color::WHITE),
        anti_alias: true,
        ..Default::default()
    };
    pixmap.fill_path(&path, &paint, FillRule::EvenOdd, Transform::identity(), None);

    Ok(pixmap)
}
