//! Decoder configuration

use content_texture_core::{DEFAULT_MAX_DIMENSION, FilterMode};
use serde::{Deserialize, Serialize};

/// Which mip levels of a record are decoded and uploaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MipLevelPolicy {
    /// Decode every level stored in the record
    #[default]
    All,
    /// Decode level 0; remaining levels are consumed from the stream and dropped
    BaseOnly,
}

/// Texture decoder options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderOptions {
    pub mip_levels: MipLevelPolicy,
    pub filter: FilterMode,
    /// Decompress block formats even when the backend samples them natively
    pub force_decompression: bool,
    pub max_dimension: u32,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            mip_levels: MipLevelPolicy::All,
            filter: FilterMode::Linear,
            force_decompression: false,
            max_dimension: DEFAULT_MAX_DIMENSION,
        }
    }
}

impl DecoderOptions {
    pub fn with_mip_levels(mut self, policy: MipLevelPolicy) -> Self {
        self.mip_levels = policy;
        self
    }

    pub fn with_filter(mut self, filter: FilterMode) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_force_decompression(mut self, force: bool) -> Self {
        self.force_decompression = force;
        self
    }

    pub fn with_max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = max_dimension;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = DecoderOptions::default();
        assert_eq!(options.mip_levels, MipLevelPolicy::All);
        assert_eq!(options.filter, FilterMode::Linear);
        assert!(!options.force_decompression);
        assert_eq!(options.max_dimension, 16384);
    }

    #[test]
    fn test_builder() {
        let options = DecoderOptions::default()
            .with_mip_levels(MipLevelPolicy::BaseOnly)
            .with_filter(FilterMode::Point)
            .with_force_decompression(true)
            .with_max_dimension(512);
        assert_eq!(options.mip_levels, MipLevelPolicy::BaseOnly);
        assert_eq!(options.filter, FilterMode::Point);
        assert!(options.force_decompression);
        assert_eq!(options.max_dimension, 512);
    }
}
