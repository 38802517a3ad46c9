//! Hashing utilities

use xxhash_rust::xxh3::xxh3_64;

/// Create a short content hash for an uploaded image
///
/// # Arguments
/// * `data` - Raw encoded image bytes
///
/// # Returns
/// An 11-character hex string hash
pub fn create_image_hash(data: &[u8]) -> String {
    let hash = xxh3_64(data);
    format!("{:016x}", hash)[..11].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_image_hash() {
        let hash = create_image_hash(b"some image bytes");
        assert_eq!(hash.len(), 11);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));

        // Same input should produce same hash
        let hash2 = create_image_hash(b"some image bytes");
        assert_eq!(hash, hash2);

        // Different input should produce different hash
        let hash3 = create_image_hash(b"other image bytes");
        assert_ne!(hash, hash3);
    }
}
