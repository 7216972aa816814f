use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use burst_core::{BurstError, BurstResult, FrameSequence, FRAME_DELAY_MS};

/// Native APNG (Animated PNG) encoder using the `png` crate.
/// Lossless, so every frame keeps its exact RGBA bytes.
pub struct ApngEncoder;

impl ApngEncoder {
    /// Encode a frame sequence to an infinitely looping Animated PNG.
    pub fn encode(sequence: &FrameSequence, output_path: &Path) -> BurstResult<()> {
        if sequence.is_empty() {
            return Err(BurstError::encode("no frames to encode for APNG", output_path));
        }

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(output_path).map_err(|e| {
            BurstError::encode(format!("failed to create APNG file: {}", e), output_path)
        })?;
        let writer = BufWriter::new(file);

        // Frame delay as a fraction of a second: 40/1000.
        let delay_num = FRAME_DELAY_MS as u16;
        let delay_den = 1000u16;

        let mut encoder = png::Encoder::new(writer, sequence.width(), sequence.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        // num_plays = 0 loops forever
        encoder
            .set_animated(sequence.len() as u32, 0)
            .map_err(|e| {
                BurstError::encode(format!("failed to set APNG animation: {}", e), output_path)
            })?;
        encoder.set_frame_delay(delay_num, delay_den).map_err(|e| {
            BurstError::encode(format!("failed to set APNG frame delay: {}", e), output_path)
        })?;

        let mut writer = encoder.write_header().map_err(|e| {
            BurstError::encode(format!("failed to write APNG header: {}", e), output_path)
        })?;

        for frame in sequence.frames() {
            writer.set_frame_delay(delay_num, delay_den).map_err(|e| {
                BurstError::encode(
                    format!("failed to set delay on frame {}: {}", frame.index, e),
                    output_path,
                )
            })?;

            writer.write_image_data(frame.data).map_err(|e| {
                BurstError::encode(
                    format!("failed to write APNG frame {}: {}", frame.index, e),
                    output_path,
                )
            })?;
        }

        writer.finish().map_err(|e| {
            BurstError::encode(format!("failed to finalize APNG: {}", e), output_path)
        })?;

        tracing::info!(
            "Encoded {} frames to APNG at {} ({}x{}, delay={}ms)",
            sequence.len(),
            output_path.display(),
            sequence.width(),
            sequence.height(),
            FRAME_DELAY_MS,
        );

        Ok(())
    }
}
