//! Reading exported animations back.
//!
//! Frames are returned coalesced: each one is the full canvas as it would be
//! displayed, not the partial region stored in the file.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::codecs::gif::GifDecoder;
use image::codecs::png::PngDecoder;
use image::{AnimationDecoder, DynamicImage};
use serde::Serialize;

use burst_core::{BurstError, BurstResult, FrameBuffer};

use crate::format::AnimationFormat;

/// Summary of an animation file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnimationInfo {
    pub format: AnimationFormat,
    pub frame_count: usize,
    pub width: u32,
    pub height: u32,
}

fn load_error(path: &Path) -> impl Fn(image::ImageError) -> BurstError + '_ {
    move |e| BurstError::image_load(format!("failed to decode animation: {}", e), path)
}

/// Decode every frame of a GIF or (A)PNG file as full-canvas RGBA8 buffers.
///
/// A plain PNG decodes as a single frame.
pub fn decode_frames(path: &Path) -> BurstResult<Vec<FrameBuffer>> {
    let format = AnimationFormat::detect(path).ok_or_else(|| {
        BurstError::image_load("unsupported animation format (expected .gif, .png or .apng)", path)
    })?;

    let file = File::open(path).map_err(|e| BurstError::image_load(e.to_string(), path))?;
    let reader = BufReader::new(file);

    let images = match format {
        AnimationFormat::Gif => GifDecoder::new(reader)
            .map_err(load_error(path))?
            .into_frames()
            .collect_frames()
            .map_err(load_error(path))?
            .into_iter()
            .map(|f| f.into_buffer())
            .collect::<Vec<_>>(),
        AnimationFormat::Apng => {
            let decoder = PngDecoder::new(reader).map_err(load_error(path))?;
            if decoder.is_apng().map_err(load_error(path))? {
                decoder
                    .apng()
                    .map_err(load_error(path))?
                    .into_frames()
                    .collect_frames()
                    .map_err(load_error(path))?
                    .into_iter()
                    .map(|f| f.into_buffer())
                    .collect()
            } else {
                vec![DynamicImage::from_decoder(decoder)
                    .map_err(load_error(path))?
                    .to_rgba8()]
            }
        }
    };

    if images.is_empty() {
        return Err(BurstError::image_load("animation contains no frames", path));
    }

    let frames = images
        .into_iter()
        .map(|img| {
            let (width, height) = img.dimensions();
            FrameBuffer::from_rgba(width, height, img.into_raw())
        })
        .collect::<BurstResult<Vec<_>>>()?;

    tracing::debug!("Decoded {} frames from {}", frames.len(), path.display());
    Ok(frames)
}

/// Frame count and canvas size of an animation file.
pub fn probe(path: &Path) -> BurstResult<AnimationInfo> {
    let format = AnimationFormat::detect(path).ok_or_else(|| {
        BurstError::image_load("unsupported animation format (expected .gif, .png or .apng)", path)
    })?;
    let frames = decode_frames(path)?;
    let (width, height) = frames
        .iter()
        .fold((0, 0), |(w, h), f| (w.max(f.width), h.max(f.height)));
    Ok(AnimationInfo {
        format,
        frame_count: frames.len(),
        width,
        height,
    })
}
