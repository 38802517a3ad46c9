//! Color math: hex encoding/decoding and brightness helpers

/// Color library for converting and classifying RGB colors
pub struct ColorLib;

impl ColorLib {
    /// Convert RGB to hex string (`#rrggbb`, lowercase, zero-padded)
    pub fn rgb_to_hex(rgb: (u8, u8, u8)) -> String {
        format!("#{:02x}{:02x}{:02x}", rgb.0, rgb.1, rgb.2)
    }

    /// Convert hex string to RGB
    pub fn hex_to_rgb(hex_str: &str) -> Option<(u8, u8, u8)> {
        let hex_str = hex_str.trim_start_matches('#');

        if hex_str.len() != 6 {
            return None;
        }

        let bytes = hex::decode(hex_str.to_ascii_lowercase()).ok()?;

        Some((bytes[0], bytes[1], bytes[2]))
    }

    /// Calculate color brightness (0-255)
    pub fn brightness(rgb: (u8, u8, u8)) -> u8 {
        ((rgb.0 as u16 + rgb.1 as u16 + rgb.2 as u16) / 3) as u8
    }

    /// Check if color is dark
    pub fn is_dark(rgb: (u8, u8, u8)) -> bool {
        Self::brightness(rgb) < 128
    }

    /// Get contrasting text color (black or white)
    pub fn get_text_color(rgb: (u8, u8, u8)) -> String {
        if Self::is_dark(rgb) {
            "#ffffff".to_string()
        } else {
            "#000000".to_string()
        }
    }
}
