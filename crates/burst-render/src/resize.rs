//! Resize adapter: cubic resampling of RGBA8 buffers via the `image` crate.

use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgba};

use burst_core::{BurstError, BurstResult, FrameBuffer};

/// Resampling filter used for every resize. Catmull-Rom is the cubic filter.
pub const RESIZE_FILTER: FilterType = FilterType::CatmullRom;

/// Resize `src` to `new_width` x `new_height` into a new buffer.
pub fn resize(src: &FrameBuffer, new_width: u32, new_height: u32) -> BurstResult<FrameBuffer> {
    if new_width == 0 || new_height == 0 {
        return Err(BurstError::Resize(format!(
            "cannot resize {}x{} to {}x{}",
            src.width, src.height, new_width, new_height
        )));
    }
    let mut out = FrameBuffer::new(new_width, new_height);
    resize_into(src, new_width, new_height, &mut out.data)?;
    Ok(out)
}

/// Resize `src` to `new_width` x `new_height`, writing into `dst`.
pub fn resize_into(
    src: &FrameBuffer,
    new_width: u32,
    new_height: u32,
    dst: &mut [u8],
) -> BurstResult<()> {
    if new_width == 0 || new_height == 0 || src.is_empty() {
        return Err(BurstError::Resize(format!(
            "cannot resize {}x{} to {}x{}",
            src.width, src.height, new_width, new_height
        )));
    }

    let expected = FrameBuffer::byte_len(new_width, new_height);
    if dst.len() != expected {
        return Err(BurstError::Resize(format!(
            "destination holds {} bytes, {}x{} needs {}",
            dst.len(),
            new_width,
            new_height,
            expected
        )));
    }

    let malformed = || {
        BurstError::Resize(format!(
            "source buffer of {} bytes is not a valid {}x{} RGBA image",
            src.data.len(),
            src.width,
            src.height
        ))
    };
    if src.data.len() != FrameBuffer::byte_len(src.width, src.height) {
        return Err(malformed());
    }

    if src.width == new_width && src.height == new_height {
        dst.copy_from_slice(&src.data);
        return Ok(());
    }

    let view = ImageBuffer::<Rgba<u8>, &[u8]>::from_raw(src.width, src.height, &src.data[..])
        .ok_or_else(malformed)?;

    let resized = imageops::resize(&view, new_width, new_height, RESIZE_FILTER);
    dst.copy_from_slice(resized.as_raw());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use burst_core::Color;

    #[test]
    fn test_resize_upscale_solid() {
        let src = FrameBuffer::solid(4, 4, &Color::RED);
        let out = resize(&src, 13, 7).unwrap();
        assert_eq!((out.width, out.height), (13, 7));
        assert_eq!(out.get_pixel(0, 0), Some([255, 0, 0, 255]));
        assert_eq!(out.get_pixel(12, 6), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_resize_downscale_dimensions() {
        let src = FrameBuffer::solid(64, 32, &Color::BLUE);
        let out = resize(&src, 8, 8).unwrap();
        assert_eq!(out.data.len(), 8 * 8 * 4);
        assert_eq!(out.get_pixel(4, 4), Some([0, 0, 255, 255]));
    }

    #[test]
    fn test_same_size_is_copy() {
        let src = FrameBuffer::from_fn(3, 3, |x, y| [x as u8, y as u8, 9, 128]);
        assert_eq!(resize(&src, 3, 3).unwrap(), src);
    }

    #[test]
    fn test_zero_target_rejected() {
        let src = FrameBuffer::solid(4, 4, &Color::RED);
        assert!(matches!(resize(&src, 0, 4), Err(BurstError::Resize(_))));
        assert!(matches!(resize(&src, 4, 0), Err(BurstError::Resize(_))));
    }

    #[test]
    fn test_malformed_source_rejected() {
        let src = FrameBuffer {
            data: vec![0; 10],
            width: 4,
            height: 4,
        };
        assert!(matches!(resize(&src, 8, 8), Err(BurstError::Resize(_))));
    }

    #[test]
    fn test_wrong_destination_rejected() {
        let src = FrameBuffer::solid(4, 4, &Color::RED);
        let mut dst = vec![0u8; 15];
        assert!(matches!(
            resize_into(&src, 2, 2, &mut dst),
            Err(BurstError::Resize(_))
        ));
    }
}
