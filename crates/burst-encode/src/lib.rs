//! # burst-encode
//!
//! Encoding module — writes arena-backed frame sequences to animated image
//! files. The output file extension is the only format selector:
//! `.gif` produces an animated GIF, `.png` / `.apng` an Animated PNG.
//! Every animation loops forever at a fixed 40 ms per frame.

pub mod apng;
pub mod decode;
pub mod format;
pub mod gif;

use std::path::Path;

use burst_core::{BurstResult, FrameSequence};

pub use apng::ApngEncoder;
pub use decode::{decode_frames, probe, AnimationInfo};
pub use format::AnimationFormat;
pub use gif::GifEncoder;

/// Encode `sequence` to `output_path`, choosing the container by extension.
///
/// Returns the format that was written. Unsupported extensions are rejected
/// before any file is created.
pub fn encode(sequence: &FrameSequence, output_path: &Path) -> BurstResult<AnimationFormat> {
    let format = AnimationFormat::from_path(output_path)?;
    match format {
        AnimationFormat::Gif => GifEncoder::encode(sequence, output_path)?,
        AnimationFormat::Apng => ApngEncoder::encode(sequence, output_path)?,
    }
    Ok(format)
}

#[cfg(test)]
pub(crate) mod test_support {
    use burst_core::{FrameArena, FrameSequence};

    /// `count` solid 4x4 frames whose green channel steps by 50.
    pub fn stepped_sequence(count: u8) -> FrameSequence {
        let mut arena = FrameArena::new(4, 4).unwrap();
        let order = (0..count)
            .map(|i| {
                let pixel = [255, i.wrapping_mul(50), 0, 255];
                arena.alloc_copy(&pixel.repeat(16)).unwrap()
            })
            .collect();
        FrameSequence::new(arena, order).unwrap()
    }

    pub fn empty_sequence() -> FrameSequence {
        FrameSequence::new(FrameArena::new(4, 4).unwrap(), Vec::new()).unwrap()
    }
}
