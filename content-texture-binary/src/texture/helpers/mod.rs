//! Texture helper utilities
//!
//! This module provides export helpers for decoded surfaces.

pub mod export;

pub use export::TextureExporter;
