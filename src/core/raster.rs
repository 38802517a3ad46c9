//! Decoded raster images and bounds-checked pixel access

use anyhow::{anyhow, Result};
use base64::{engine::general_purpose, Engine as _};
use image::RgbaImage;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::ColorSample;
use crate::utils::hashing::create_image_hash;

/// Metadata prefix of a base64 image data URI
static DATA_URI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^data:image/[a-zA-Z0-9.+-]+;base64,").unwrap());

/// A decoded image: RGBA pixel buffer plus identity metadata
pub struct RasterImage {
    /// Content hash of the encoded bytes
    pub id: String,
    pub width: u32,
    pub height: u32,
    /// Unix timestamp of when the image was decoded
    pub uploaded_at: i64,
    pixels: RgbaImage,
}

impl RasterImage {
    /// Decode an image from raw encoded bytes (PNG, JPEG, WebP, ...)
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(data)?;
        let pixels = img.to_rgba8();

        Ok(Self {
            id: create_image_hash(data),
            width: pixels.width(),
            height: pixels.height(),
            uploaded_at: chrono::Utc::now().timestamp(),
            pixels,
        })
    }

    /// Decode an image from a `data:image/...;base64,` URI
    pub fn from_data_uri(src: &str) -> Result<Self> {
        let prefix = DATA_URI_RE
            .find(src)
            .ok_or_else(|| anyhow!("not a base64 image data URI"))?;

        let data = general_purpose::STANDARD.decode(src[prefix.end()..].trim())?;

        Self::from_bytes(&data)
    }

    /// Color at an exact pixel, or None when out of bounds
    pub fn pixel_at(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let rgba = self.pixels.get_pixel(x, y).0;
        Some((rgba[0], rgba[1], rgba[2]))
    }

    /// Sample a pixel as a ColorSample
    pub fn sample(&self, x: u32, y: u32) -> Option<ColorSample> {
        self.pixel_at(x, y).map(ColorSample::from_rgb)
    }

    pub fn buffer(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// Encode an RGB pixel grid as PNG bytes, row-major
#[cfg(test)]
pub(crate) fn encode_png(pixels: &[(u8, u8, u8)], width: u32, height: u32) -> Vec<u8> {
    use std::io::Cursor;

    let mut img = RgbaImage::new(width, height);
    for (i, (r, g, b)) in pixels.iter().enumerate() {
        let x = i as u32 % width;
        let y = i as u32 / width;
        img.put_pixel(x, y, image::Rgba([*r, *g, *b, 255]));
    }

    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}
