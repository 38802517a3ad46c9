//! Utility modules for Shade Finder

pub mod hashing;
