//! Display viewport math: fitting an image into the page and mapping
//! pointer coordinates back to source pixels

use serde::{Deserialize, Serialize};

/// Fraction of the viewport height the rendered image may occupy
pub const VIEWPORT_HEIGHT_CAP: f64 = 0.7;

/// Browser-reported layout box, in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerSize {
    pub width: f64,
    pub viewport_height: f64,
}

impl ContainerSize {
    pub fn new(width: f64, viewport_height: f64) -> Self {
        Self {
            width,
            viewport_height,
        }
    }
}

impl Default for ContainerSize {
    fn default() -> Self {
        Self::new(1024.0, 768.0)
    }
}

/// Mapping between display coordinates and source pixel coordinates.
///
/// The image is rendered at the container width; if that makes it taller
/// than 70% of the viewport, it is refitted from the height instead. The
/// aspect ratio is preserved either way, so one uniform scale factor maps
/// both axes.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DisplayTransform {
    pub source_width: u32,
    pub source_height: u32,
    pub display_width: f64,
    pub display_height: f64,
}

impl DisplayTransform {
    pub fn fit(source_width: u32, source_height: u32, container: ContainerSize) -> Self {
        let aspect = source_width.max(1) as f64 / source_height.max(1) as f64;

        let mut display_width = container.width.max(1.0);
        let mut display_height = display_width / aspect;

        let height_cap = (container.viewport_height * VIEWPORT_HEIGHT_CAP).max(1.0);
        if display_height > height_cap {
            display_height = height_cap;
            display_width = display_height * aspect;
        }

        Self {
            source_width,
            source_height,
            display_width,
            display_height,
        }
    }

    /// Display pixels per source pixel
    pub fn scale(&self) -> f64 {
        self.display_width / self.source_width.max(1) as f64
    }

    /// Whether a display-space point lies on the rendered image
    pub fn contains(&self, dx: f64, dy: f64) -> bool {
        dx >= 0.0 && dy >= 0.0 && dx < self.display_width && dy < self.display_height
    }

    /// Map a display-space point to the source pixel under it.
    ///
    /// Points outside the rendered image clamp to the nearest edge pixel,
    /// so callers never index out of bounds.
    pub fn to_source(&self, dx: f64, dy: f64) -> (u32, u32) {
        let scale = self.scale();

        let x = (dx / scale).floor();
        let y = (dy / scale).floor();

        let max_x = self.source_width.saturating_sub(1) as f64;
        let max_y = self.source_height.saturating_sub(1) as f64;

        (x.clamp(0.0, max_x) as u32, y.clamp(0.0, max_y) as u32)
    }
}
