//! Data models for Shade Finder
//!
//! This module contains the core data structures shared across the application.

mod color;
mod lipstick;

pub use color::ColorSample;
pub use lipstick::{LipstickMatches, LipstickProduct};
