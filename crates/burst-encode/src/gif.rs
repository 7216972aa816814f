use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use burst_core::{BurstError, BurstResult, FrameSequence, FRAME_DELAY_MS};

/// Native GIF encoder using the `image` crate.
pub struct GifEncoder;

impl GifEncoder {
    /// Encode a frame sequence to an infinitely looping animated GIF.
    ///
    /// Every frame is shown for [`FRAME_DELAY_MS`] (4 centiseconds).
    pub fn encode(sequence: &FrameSequence, output_path: &Path) -> BurstResult<()> {
        if sequence.is_empty() {
            return Err(BurstError::encode("no frames to encode for GIF", output_path));
        }

        // Ensure output directory exists
        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(output_path).map_err(|e| {
            BurstError::encode(format!("failed to create GIF file: {}", e), output_path)
        })?;
        let writer = BufWriter::new(file);

        let width = sequence.width();
        let height = sequence.height();
        let mut encoder = image::codecs::gif::GifEncoder::new_with_speed(writer, 10);
        encoder
            .set_repeat(image::codecs::gif::Repeat::Infinite)
            .map_err(|e| {
                BurstError::encode(format!("failed to set GIF repeat: {}", e), output_path)
            })?;

        for frame in sequence.frames() {
            let buffer = image::RgbaImage::from_raw(width, height, frame.data.to_vec())
                .ok_or_else(|| {
                    BurstError::encode(
                        format!("invalid pixel data at frame {}", frame.index),
                        output_path,
                    )
                })?;
            let gif_frame = image::Frame::from_parts(
                buffer,
                0,
                0,
                image::Delay::from_numer_denom_ms(FRAME_DELAY_MS, 1),
            );

            encoder.encode_frame(gif_frame).map_err(|e| {
                BurstError::encode(
                    format!("failed to encode GIF frame {}: {}", frame.index, e),
                    output_path,
                )
            })?;
        }

        tracing::info!(
            "Encoded {} frames to GIF at {} ({}x{}, delay={}ms)",
            sequence.len(),
            output_path.display(),
            width,
            height,
            FRAME_DELAY_MS,
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{empty_sequence, stepped_sequence};

    #[test]
    fn test_gif_encode_empty_sequence() {
        let out = std::env::temp_dir().join("burst_test_empty.gif");
        let result = GifEncoder::encode(&empty_sequence(), &out);
        assert!(matches!(result, Err(BurstError::Encode(_))));
    }

    #[test]
    fn test_gif_encode_solid_frames() {
        let out = std::env::temp_dir().join("burst_test_gif.gif");
        let result = GifEncoder::encode(&stepped_sequence(5), &out);
        assert!(result.is_ok(), "GIF encode failed: {:?}", result.err());

        let bytes = std::fs::read(&out).unwrap();
        assert!(bytes.starts_with(b"GIF89a"));
        // NETSCAPE2.0 application extension carries the loop count.
        assert!(bytes.windows(11).any(|w| w == b"NETSCAPE2.0"));

        let _ = std::fs::remove_file(&out);
    }

    #[test]
    fn test_gif_encode_creates_parent_dirs() {
        let dir = std::env::temp_dir().join("burst_test_gif_nested");
        let _ = std::fs::remove_dir_all(&dir);
        let out = dir.join("deeper").join("anim.gif");
        GifEncoder::encode(&stepped_sequence(2), &out).unwrap();
        assert!(out.is_file());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
