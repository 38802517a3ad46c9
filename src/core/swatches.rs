//! Dominant-color swatches suggested from the uploaded photo

use image::GenericImageView;
use palette::{FromColor, Hsl, Srgb};
use std::collections::HashMap;

use crate::core::raster::RasterImage;
use crate::models::ColorSample;

pub const DEFAULT_SWATCH_COUNT: usize = 6;
pub const MAX_SWATCH_COUNT: usize = 12;

/// Thumbnail bound used before ranking pixels
const THUMB_SIZE: u32 = 100;

/// Quantization shift: 8 bins per channel
const BUCKET_SHIFT: u8 = 5;

/// Extract up to `count` prominent colors from the photo, most frequent
/// first.
///
/// Pixels are ranked in quantized RGB buckets after dropping near-black,
/// near-white, and washed-out tones; if that filter leaves nothing (flat or
/// grayscale photos), ranking falls back to every pixel.
pub fn suggest_swatches(image: &RasterImage, count: usize) -> Vec<ColorSample> {
    let count = count.clamp(1, MAX_SWATCH_COUNT);

    let thumbnail =
        image::DynamicImage::ImageRgba8(image.buffer().clone()).thumbnail(THUMB_SIZE, THUMB_SIZE);

    let mut colors: Vec<(u8, u8, u8)> = Vec::new();
    for (_, _, pixel) in thumbnail.pixels() {
        let rgba = pixel.0;
        colors.push((rgba[0], rgba[1], rgba[2]));
    }

    let filtered: Vec<(u8, u8, u8)> = colors
        .iter()
        .copied()
        .filter(|rgb| is_vivid(*rgb))
        .collect();

    let colors_to_use = if filtered.is_empty() { &colors } else { &filtered };

    rank_buckets(colors_to_use, count)
}

/// Keep tones a user would plausibly pick as a lipstick reference
fn is_vivid(rgb: (u8, u8, u8)) -> bool {
    let srgb = Srgb::new(
        rgb.0 as f32 / 255.0,
        rgb.1 as f32 / 255.0,
        rgb.2 as f32 / 255.0,
    );
    let hsl = Hsl::from_color(srgb);

    hsl.lightness > 0.12 && hsl.lightness < 0.88 && hsl.saturation > 0.15
}

fn rank_buckets(colors: &[(u8, u8, u8)], count: usize) -> Vec<ColorSample> {
    struct Bucket {
        count: u64,
        sum_r: u64,
        sum_g: u64,
        sum_b: u64,
    }

    let mut buckets: HashMap<(u8, u8, u8), Bucket> = HashMap::new();

    for (r, g, b) in colors.iter().copied() {
        let key = (r >> BUCKET_SHIFT, g >> BUCKET_SHIFT, b >> BUCKET_SHIFT);
        let bucket = buckets.entry(key).or_insert(Bucket {
            count: 0,
            sum_r: 0,
            sum_g: 0,
            sum_b: 0,
        });

        bucket.count += 1;
        bucket.sum_r += r as u64;
        bucket.sum_g += g as u64;
        bucket.sum_b += b as u64;
    }

    let mut ranked: Vec<_> = buckets.into_iter().collect();
    ranked.sort_by(|(ka, a), (kb, b)| b.count.cmp(&a.count).then(ka.cmp(kb)));

    ranked
        .into_iter()
        .take(count)
        .map(|(_, bucket)| {
            ColorSample::new(
                (bucket.sum_r / bucket.count) as u8,
                (bucket.sum_g / bucket.count) as u8,
                (bucket.sum_b / bucket.count) as u8,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::raster::encode_png;

    #[test]
    fn test_most_frequent_color_ranks_first() {
        // 8 red, 4 green, 4 blue pixels
        let mut pixels = vec![(200, 30, 40); 8];
        pixels.extend(vec![(40, 180, 60); 4]);
        pixels.extend(vec![(30, 60, 200); 4]);

        let png = encode_png(&pixels, 4, 4);
        let raster = RasterImage::from_bytes(&png).unwrap();

        let swatches = suggest_swatches(&raster, 3);
        assert_eq!(swatches.len(), 3);
        assert_eq!(swatches[0].rgb(), (200, 30, 40));
    }

    #[test]
    fn test_count_is_clamped() {
        let png = encode_png(&[(200, 30, 40); 4], 2, 2);
        let raster = RasterImage::from_bytes(&png).unwrap();

        assert_eq!(suggest_swatches(&raster, 0).len(), 1);
        assert!(suggest_swatches(&raster, 500).len() <= MAX_SWATCH_COUNT);
    }

    #[test]
    fn test_grayscale_falls_back_to_all_pixels() {
        let png = encode_png(&[(128, 128, 128); 4], 2, 2);
        let raster = RasterImage::from_bytes(&png).unwrap();

        let swatches = suggest_swatches(&raster, 6);
        assert_eq!(swatches.len(), 1);
        assert_eq!(swatches[0].rgb(), (128, 128, 128));
    }

    #[test]
    fn test_vivid_filter() {
        assert!(is_vivid((200, 30, 40)));
        assert!(!is_vivid((5, 5, 5)));
        assert!(!is_vivid((250, 250, 250)));
        assert!(!is_vivid((128, 128, 128)));
    }
}
