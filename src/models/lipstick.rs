//! Lipstick recommendation models

use serde::{Deserialize, Serialize};

/// A single recommended lipstick product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LipstickProduct {
    pub brand: String,
    #[serde(rename = "shadeName")]
    pub shade_name: String,
}

impl LipstickProduct {
    pub fn new(brand: impl Into<String>, shade_name: impl Into<String>) -> Self {
        Self {
            brand: brand.into(),
            shade_name: shade_name.into(),
        }
    }
}

/// The structured payload the recommendation service must return
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LipstickMatches {
    pub lipsticks: Vec<LipstickProduct>,
}
