//! # burst-core
//!
//! Core types and primitives for the Burst explode-animation generator.
//! This crate contains the foundational types shared across all Burst crates:
//! pixel buffers, colors, distortion levels, the frame arena, frame sequences,
//! content hashing, configuration and error types.

pub mod arena;
pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod hash;
pub mod level;
pub mod sequence;

pub use config::*;

pub use arena::{FrameArena, FrameSlot};
pub use color::Color;
pub use error::{BurstError, BurstResult};
pub use frame::FrameBuffer;
pub use level::DistortionLevel;
pub use sequence::{CancelToken, Frame, FrameSequence};

/// Number of bytes per RGBA8 pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// Display duration of every frame in timed animation formats (25 fps).
pub const FRAME_DELAY_MS: u32 = 40;
