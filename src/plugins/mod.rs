//! Plugin system for Shade Finder
//!
//! External recommendation backends live here behind the `ShadeProvider` trait.

pub mod gemini;

pub use gemini::{GeminiProvider, ShadeLookupError, ShadeProvider};
