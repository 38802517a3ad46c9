//! Color picker surface: owns the uploaded image and its display transform

use serde::Serialize;

use crate::core::raster::RasterImage;
use crate::core::viewport::{ContainerSize, DisplayTransform};
use crate::models::ColorSample;

/// One uploaded image fitted into the page, ready for pointer sampling.
///
/// The surface owns the decoded buffer for the lifetime of one upload and
/// is replaced wholesale when a new image arrives.
pub struct PickerSurface {
    image: RasterImage,
    container: ContainerSize,
    transform: DisplayTransform,
}

/// Serializable snapshot of the surface for API responses
#[derive(Debug, Clone, Serialize)]
pub struct SurfaceView {
    pub image_id: String,
    pub source_width: u32,
    pub source_height: u32,
    pub display_width: f64,
    pub display_height: f64,
    pub uploaded_at: i64,
}

impl PickerSurface {
    pub fn new(image: RasterImage, container: ContainerSize) -> Self {
        let transform = DisplayTransform::fit(image.width, image.height, container);

        Self {
            image,
            container,
            transform,
        }
    }

    /// Refit the transform after a container resize
    pub fn set_container(&mut self, container: ContainerSize) {
        self.container = container;
        self.transform = DisplayTransform::fit(self.image.width, self.image.height, container);
    }

    /// Sample the source pixel under a display-space point.
    ///
    /// Coordinates clamp to the rendered image, so every point yields a
    /// sample from real pixels.
    pub fn sample_display_point(&self, dx: f64, dy: f64) -> ColorSample {
        let (x, y) = self.transform.to_source(dx, dy);

        self.image
            .sample(x, y)
            .unwrap_or_else(|| ColorSample::new(0, 0, 0))
    }

    pub fn image(&self) -> &RasterImage {
        &self.image
    }

    pub fn transform(&self) -> &DisplayTransform {
        &self.transform
    }

    pub fn container(&self) -> ContainerSize {
        self.container
    }

    pub fn view(&self) -> SurfaceView {
        SurfaceView {
            image_id: self.image.id.clone(),
            source_width: self.image.width,
            source_height: self.image.height,
            display_width: self.transform.display_width,
            display_height: self.transform.display_height,
            uploaded_at: self.image.uploaded_at,
        }
    }
}
