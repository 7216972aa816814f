//! Image loading module.
//! Decodes PNG, JPEG, GIF, WebP and the other formats the `image` crate
//! understands into straight-alpha RGBA8 FrameBuffers.

use std::path::Path;

use burst_core::{BurstError, BurstResult, FrameBuffer};

/// Load an image file and convert it to a FrameBuffer.
pub fn load_image(path: &Path) -> BurstResult<FrameBuffer> {
    let img = image::open(path).map_err(|e| {
        BurstError::image_load(
            format!("failed to load image '{}': {}", path.display(), e),
            path,
        )
    })?;

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    tracing::debug!("Loaded {} ({}x{})", path.display(), width, height);

    FrameBuffer::from_rgba(width, height, rgba.into_raw())
}

/// Load an image from raw encoded bytes (e.g. an embedded asset).
pub fn load_image_from_bytes(data: &[u8]) -> BurstResult<FrameBuffer> {
    let img = image::load_from_memory(data).map_err(|e| {
        BurstError::image_load(format!("failed to decode image: {}", e), "<memory>")
    })?;

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    FrameBuffer::from_rgba(width, height, rgba.into_raw())
}
