//! Core library functions for Shade Finder

pub mod colorlib;
pub mod magnifier;
pub mod picker;
pub mod raster;
pub mod session;
pub mod swatches;
pub mod viewport;

pub use picker::PickerSurface;
pub use raster::RasterImage;
pub use session::{SessionState, SessionView, UiEvent};
pub use viewport::{ContainerSize, DisplayTransform};
