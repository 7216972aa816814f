//! Radial displacement ("explode") transform.
//!
//! Every output pixel samples the source along the ray toward the image
//! center. Inside the influence circle (radius = half the shorter side) the
//! sampled offset is scaled by `(distance / max_radius) ^ level`, which pulls
//! content toward the center; outside it the mapping is the identity.

use burst_core::{DistortionLevel, FrameBuffer, BYTES_PER_PIXEL};

/// Precomputed sampling map for one image size and level.
#[derive(Debug, Clone, Copy)]
struct RadialMap {
    width: i32,
    height: i32,
    cx: i32,
    cy: i32,
    max_radius: f32,
    exponent: f32,
}

impl RadialMap {
    /// None when the mapping is the identity.
    fn new(width: u32, height: u32, level: DistortionLevel) -> Option<Self> {
        if level.is_identity() || width == 0 || height == 0 {
            return None;
        }
        let max_radius = width.min(height) as f32 / 2.0;
        if max_radius <= 0.0 {
            return None;
        }
        Some(Self {
            width: width as i32,
            height: height as i32,
            cx: (width / 2) as i32,
            cy: (height / 2) as i32,
            max_radius,
            exponent: level.value(),
        })
    }

    #[inline]
    fn sample(&self, x: i32, y: i32) -> (i32, i32) {
        let dx = (x - self.cx) as f32;
        let dy = (y - self.cy) as f32;
        let distance = (dx * dx + dy * dy).sqrt();

        let factor = if distance < self.max_radius {
            (distance / self.max_radius).powf(self.exponent)
        } else {
            1.0
        };

        // `as i32` truncates the scaled offset toward zero.
        let sx = (self.cx + (dx * factor) as i32).clamp(0, self.width - 1);
        let sy = (self.cy + (dy * factor) as i32).clamp(0, self.height - 1);
        (sx, sy)
    }
}

/// Source pixel sampled for output pixel `(x, y)` of a `width`x`height` image.
///
/// The result is always within `[0, width-1] x [0, height-1]` for non-empty images.
pub fn source_coord(x: u32, y: u32, width: u32, height: u32, level: DistortionLevel) -> (u32, u32) {
    match RadialMap::new(width, height, level) {
        Some(map) => {
            let (sx, sy) = map.sample(x as i32, y as i32);
            (sx as u32, sy as u32)
        }
        None => (x, y),
    }
}

/// Write the distorted version of `src` into `dst`, reading only from `src`.
///
/// # Panics
/// If `dst.len() != src.data.len()`.
pub fn distort_into(src: &FrameBuffer, level: DistortionLevel, dst: &mut [u8]) {
    assert_eq!(
        dst.len(),
        src.data.len(),
        "destination must match the {}x{} source",
        src.width,
        src.height
    );

    let Some(map) = RadialMap::new(src.width, src.height, level) else {
        dst.copy_from_slice(&src.data);
        return;
    };

    let width = src.width as usize;
    let row_bytes = width * BYTES_PER_PIXEL;
    for (y, row) in dst.chunks_exact_mut(row_bytes).enumerate() {
        for (x, out) in row.chunks_exact_mut(BYTES_PER_PIXEL).enumerate() {
            let (sx, sy) = map.sample(x as i32, y as i32);
            let offset = ((sy as usize) * width + sx as usize) * BYTES_PER_PIXEL;
            out.copy_from_slice(&src.data[offset..offset + BYTES_PER_PIXEL]);
        }
    }
}

/// Return a distorted copy of `image`.
pub fn distort(image: &FrameBuffer, level: DistortionLevel) -> FrameBuffer {
    if level.is_identity() {
        return image.clone();
    }
    let mut out = FrameBuffer::new(image.width, image.height);
    distort_into(image, level, &mut out.data);
    out
}

/// Distort `image` in place. The source is snapshotted before any write.
pub fn distort_in_place(image: &mut FrameBuffer, level: DistortionLevel) {
    if level.is_identity() {
        return;
    }
    let snapshot = image.clone();
    distort_into(&snapshot, level, &mut image.data);
}
