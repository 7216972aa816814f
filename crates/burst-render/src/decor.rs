//! Decorative frame table appended after the distortion frames.
//!
//! The built-in set is a fixed run of small explosion frames at their own
//! native resolutions. They are synthesized once, on first use, and are
//! identical on every run. A directory of PNG frames can replace them.

use std::path::Path;
use std::sync::OnceLock;

use burst_core::{BurstError, BurstResult, Color, FrameBuffer};

use crate::image_loader::load_image;

/// Number of frames in the built-in decorative set.
pub const BUILTIN_DECOR_FRAMES: usize = 22;

/// Ordered decorative frames, each at its native resolution.
#[derive(Debug, Clone)]
pub struct DecorSet {
    frames: Vec<FrameBuffer>,
}

impl DecorSet {
    /// The built-in explosion frames.
    pub fn builtin() -> &'static DecorSet {
        static BUILTIN: OnceLock<DecorSet> = OnceLock::new();
        BUILTIN.get_or_init(|| DecorSet {
            frames: (0..BUILTIN_DECOR_FRAMES).map(explosion_frame).collect(),
        })
    }

    /// Use the given frames, in order.
    pub fn from_frames(frames: Vec<FrameBuffer>) -> BurstResult<Self> {
        if let Some((i, frame)) = frames.iter().enumerate().find(|(_, f)| f.is_empty()) {
            return Err(BurstError::InvalidArgument(format!(
                "decorative frame {} is {}x{}",
                i, frame.width, frame.height
            )));
        }
        Ok(Self { frames })
    }

    /// Load every `.png` in `dir`, ordered by file name.
    pub fn from_dir(dir: &Path) -> BurstResult<Self> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let is_png = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("png"));
            if is_png && path.is_file() {
                paths.push(path);
            } else {
                tracing::warn!("Skipping non-PNG decor entry {}", path.display());
            }
        }
        paths.sort();

        if paths.is_empty() {
            return Err(BurstError::InvalidArgument(format!(
                "no PNG decorative frames found in {}",
                dir.display()
            )));
        }

        let frames = paths
            .iter()
            .map(|p| load_image(p))
            .collect::<BurstResult<Vec<_>>>()?;
        tracing::info!("Loaded {} decorative frames from {}", frames.len(), dir.display());
        Self::from_frames(frames)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[FrameBuffer] {
        &self.frames
    }
}

/// Cheap integer hash mapped to [0, 1), used for smoke grain.
fn speckle(x: u32, y: u32, seed: u32) -> f32 {
    let mut h = x.wrapping_mul(0x9E37_79B1) ^ y.wrapping_mul(0x85EB_CA77) ^ seed.wrapping_mul(0xC2B2_AE3D);
    h ^= h >> 15;
    h = h.wrapping_mul(0x2C1B_3C6D);
    h ^= h >> 12;
    (h & 0xFFFF) as f32 / 65536.0
}

/// Frame `index` of the built-in set: a fireball that swells, cools into
/// smoke and fades out, trailed by a thin shockwave ring.
fn explosion_frame(index: usize) -> FrameBuffer {
    let t = index as f32 / (BUILTIN_DECOR_FRAMES - 1) as f32;
    let side = 48 + 2 * index as u32;
    let half = side as f32 / 2.0;

    let ease_out = 1.0 - (1.0 - t) * (1.0 - t);
    let fireball = half * (0.25 + 0.65 * ease_out);
    let shock = half * t;
    let fade = (1.0 - t).powf(0.8);

    let core = Color::rgb(1.0, 0.95, 0.7).lerp(&Color::rgb(0.35, 0.3, 0.3), t);
    let rim = Color::rgb(1.0, 0.45, 0.05).lerp(&Color::rgb(0.15, 0.12, 0.12), t);
    let ring = Color::WHITE.lerp(&rim, t);

    FrameBuffer::from_fn(side, side, |x, y| {
        let dx = x as f32 + 0.5 - half;
        let dy = y as f32 + 0.5 - half;
        let d = (dx * dx + dy * dy).sqrt();

        if d < fireball {
            let u = d / fireball;
            let grain = speckle(x, y, index as u32);
            let color = core.lerp(&rim, u).lerp(&Color::BLACK, grain * 0.3 * t);
            color.with_alpha(fade * (1.0 - 0.5 * u * u)).to_rgba8()
        } else if index > 0 && (d - shock).abs() < 1.5 {
            ring.with_alpha(fade * 0.6).to_rgba8()
        } else {
            [0, 0, 0, 0]
        }
    })
}
