//! Color sample model

use serde::{Deserialize, Serialize};

use crate::core::colorlib::ColorLib;

/// A sampled color: RGB triplet plus its hex encoding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSample {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub hex: String,
    /// Black or white, whichever reads against this color
    pub text_color: String,
}

impl ColorSample {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self {
            r,
            g,
            b,
            hex: ColorLib::rgb_to_hex((r, g, b)),
            text_color: ColorLib::get_text_color((r, g, b)),
        }
    }

    pub fn from_rgb(rgb: (u8, u8, u8)) -> Self {
        Self::new(rgb.0, rgb.1, rgb.2)
    }

    /// Parse a `#rrggbb` string into a sample
    pub fn from_hex(hex_str: &str) -> Option<Self> {
        ColorLib::hex_to_rgb(hex_str).map(Self::from_rgb)
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}
