use std::fmt;
use std::path::Path;

use serde::Serialize;

use burst_core::{BurstError, BurstResult};

/// Animated container written for an output path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationFormat {
    /// Animated GIF (palette-quantized).
    Gif,
    /// Animated PNG (lossless RGBA).
    Apng,
}

impl AnimationFormat {
    /// Pick the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> BurstResult<Self> {
        Self::detect(path).ok_or_else(|| {
            BurstError::encode(
                "unsupported animation format (expected .gif, .png or .apng)",
                path,
            )
        })
    }

    /// Like [`from_path`](Self::from_path) but without building an error.
    pub fn detect(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "gif" => Some(AnimationFormat::Gif),
            "png" | "apng" => Some(AnimationFormat::Apng),
            _ => None,
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            AnimationFormat::Gif => "GIF",
            AnimationFormat::Apng => "APNG",
        }
    }
}

impl fmt::Display for AnimationFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
