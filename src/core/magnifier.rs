//! Magnifier overlay: zoomed circular preview of the region under the pointer

use anyhow::Result;
use image::{ImageFormat, Rgba, RgbaImage};
use serde::Serialize;
use std::io::Cursor;

use crate::core::picker::PickerSurface;

/// Diameter of the circular preview, in display pixels
pub const MAGNIFIER_SIZE: f64 = 100.0;

/// Fixed zoom factor of the preview
pub const MAGNIFIER_ZOOM: f64 = 3.0;

/// Border ring thickness, in preview pixels
const BORDER_WIDTH: f64 = 4.0;

/// Placement and styling of the overlay for one pointer position.
///
/// `left`/`top` position the circle centered on the pointer; the background
/// fields reproduce a CSS `background-position`/`background-size` pair that
/// keeps the pixel under the pointer at the circle's center.
#[derive(Debug, Clone, Serialize)]
pub struct MagnifierView {
    pub visible: bool,
    pub left: f64,
    pub top: f64,
    pub background_x: f64,
    pub background_y: f64,
    pub background_width: f64,
    pub background_height: f64,
    pub border_color: String,
    pub size: f64,
}

/// Compute the overlay placement for a pointer at display point (dx, dy)
pub fn magnifier_at(surface: &PickerSurface, dx: f64, dy: f64) -> MagnifierView {
    let transform = surface.transform();
    let sample = surface.sample_display_point(dx, dy);
    let half = MAGNIFIER_SIZE / 2.0;

    MagnifierView {
        visible: transform.contains(dx, dy),
        left: dx - half,
        top: dy - half,
        background_x: -(dx * MAGNIFIER_ZOOM - half),
        background_y: -(dy * MAGNIFIER_ZOOM - half),
        background_width: transform.display_width * MAGNIFIER_ZOOM,
        background_height: transform.display_height * MAGNIFIER_ZOOM,
        border_color: sample.hex,
        size: MAGNIFIER_SIZE,
    }
}

/// Render the circular preview as a PNG.
///
/// Nearest-neighbor magnification of the display around (dx, dy); the ring
/// takes the sampled color, regions past the image edge render white, and
/// everything outside the circle is transparent.
pub fn render_png(surface: &PickerSurface, dx: f64, dy: f64) -> Result<Vec<u8>> {
    let size = MAGNIFIER_SIZE as u32;
    let half = MAGNIFIER_SIZE / 2.0;
    let radius = half;
    let ring_inner = radius - BORDER_WIDTH;

    let transform = *surface.transform();
    let border = surface.sample_display_point(dx, dy).rgb();

    let mut out = RgbaImage::new(size, size);

    for oy in 0..size {
        for ox in 0..size {
            let cx = ox as f64 - (half - 0.5);
            let cy = oy as f64 - (half - 0.5);
            let dist = (cx * cx + cy * cy).sqrt();

            let pixel = if dist > radius {
                Rgba([0, 0, 0, 0])
            } else if dist > ring_inner {
                Rgba([border.0, border.1, border.2, 255])
            } else {
                let sdx = dx + (ox as f64 - half) / MAGNIFIER_ZOOM;
                let sdy = dy + (oy as f64 - half) / MAGNIFIER_ZOOM;

                if transform.contains(sdx, sdy) {
                    let (x, y) = transform.to_source(sdx, sdy);
                    match surface.image().pixel_at(x, y) {
                        Some((r, g, b)) => Rgba([r, g, b, 255]),
                        None => Rgba([255, 255, 255, 255]),
                    }
                } else {
                    Rgba([255, 255, 255, 255])
                }
            };

            out.put_pixel(ox, oy, pixel);
        }
    }

    let mut buf = Vec::new();
    out.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;

    Ok(buf)
}
