//! # burst-render
//!
//! Frame generation for Burst. Loads a source image, applies the radial
//! displacement transform at each scheduled level, resizes the decorative
//! frames to the source resolution and assembles everything into one
//! arena-backed frame sequence.

pub mod builder;
pub mod decor;
pub mod distort;
pub mod image_loader;
pub mod resize;

pub use builder::{build_sequence, FrameCallback, SequenceBuilder, DISTORTION_FRAMES};
pub use decor::{DecorSet, BUILTIN_DECOR_FRAMES};
pub use distort::{distort, distort_in_place, distort_into, source_coord};
pub use image_loader::{load_image, load_image_from_bytes};
pub use resize::{resize, resize_into};
