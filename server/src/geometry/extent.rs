//! Axis-aligned bounding boxes in projected coordinates

/// Axis-aligned bounding box in EPSG:3857 meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl Extent {
    /// Enclosing box of every vertex across every ring.
    ///
    /// Empty input yields an inverted box (`xmin = +inf`); callers must check
    /// [`Extent::is_valid`] before using the result.
    pub fn from_rings(rings: &[Vec<[f64; 2]>]) -> Self {
        let mut extent = Self {
            xmin: f64::INFINITY,
            ymin: f64::INFINITY,
            xmax: f64::NEG_INFINITY,
            ymax: f64::NEG_INFINITY,
        };
        for ring in rings {
            for &[x, y] in ring {
                extent.xmin = extent.xmin.min(x);
                extent.ymin = extent.ymin.min(y);
                extent.xmax = extent.xmax.max(x);
                extent.ymax = extent.ymax.max(y);
            }
        }
        extent
    }

    /// Whether this box encloses at least one point and has non-negative area.
    pub fn is_valid(&self) -> bool {
        self.xmin.is_finite()
            && self.ymin.is_finite()
            && self.xmax >= self.xmin
            && self.ymax >= self.ymin
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Scale width and height about the center by `factor`.
    pub fn expanded(&self, factor: f64) -> Self {
        let cx = (self.xmin + self.xmax) / 2.0;
        let cy = (self.ymin + self.ymax) / 2.0;
        let half_w = self.width() * factor / 2.0;
        let half_h = self.height() * factor / 2.0;
        Self {
            xmin: cx - half_w,
            ymin: cy - half_h,
            xmax: cx + half_w,
            ymax: cy + half_h,
        }
    }

    /// Derive a pixel size preserving this box's aspect ratio.
    ///
    /// The longer side equals `max_size`; the shorter side is rounded from the
    /// aspect ratio and floored at 2 to avoid degenerate images.
    pub fn size_for(&self, max_size: u32) -> (u32, u32) {
        let aspect = self.width() / self.height();
        let (width, height) = if aspect >= 1.0 {
            (max_size as f64, (max_size as f64 / aspect).round())
        } else {
            ((max_size as f64 * aspect).round(), max_size as f64)
        };
        (width.max(2.0) as u32, height.max(2.0) as u32)
    }
}
