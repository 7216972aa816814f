//! Ordered, arena-backed frame sequences.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::arena::{FrameArena, FrameSlot};
use crate::{BurstError, BurstResult, FrameBuffer, BYTES_PER_PIXEL};

/// Immutable view of one frame at its position in the output sequence.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Zero-based playback position.
    pub index: usize,
    pub width: u32,
    pub height: u32,
    /// RGBA8 pixels, `width * height * 4` bytes.
    pub data: &'a [u8],
}

impl Frame<'_> {
    /// Get the RGBA value at a pixel coordinate. Returns None if out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = ((y as usize) * (self.width as usize) + (x as usize)) * BYTES_PER_PIXEL;
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(&self.data[offset..offset + BYTES_PER_PIXEL]);
        Some(rgba)
    }

    /// Copy the frame out of the arena.
    pub fn to_frame_buffer(&self) -> FrameBuffer {
        FrameBuffer {
            data: self.data.to_vec(),
            width: self.width,
            height: self.height,
        }
    }
}

/// Frames in playback order, all backed by one arena and sharing one size.
///
/// The sequence owns the arena; dropping or [`release`](Self::release)-ing it
/// frees every frame at once.
#[derive(Debug)]
pub struct FrameSequence {
    arena: FrameArena,
    order: Vec<FrameSlot>,
}

impl FrameSequence {
    /// Assemble a sequence from slots of `arena` in playback order.
    pub fn new(arena: FrameArena, order: Vec<FrameSlot>) -> BurstResult<Self> {
        if let Some(bad) = order.iter().find(|slot| arena.get(**slot).is_none()) {
            return Err(BurstError::InvalidArgument(format!(
                "slot {} is not allocated in this arena ({} slots)",
                bad.index(),
                arena.len()
            )));
        }
        Ok(Self { arena, order })
    }

    pub fn width(&self) -> u32 {
        self.arena.width()
    }

    pub fn height(&self) -> u32 {
        self.arena.height()
    }

    /// Number of frames in playback order.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Bytes held by the backing arena.
    pub fn allocated_bytes(&self) -> usize {
        self.arena.allocated_bytes()
    }

    /// Frame at playback position `index`.
    pub fn frame(&self, index: usize) -> Option<Frame<'_>> {
        let slot = *self.order.get(index)?;
        let data = self.arena.get(slot)?;
        Some(Frame {
            index,
            width: self.arena.width(),
            height: self.arena.height(),
            data,
        })
    }

    /// All frames in playback order.
    pub fn frames(&self) -> impl Iterator<Item = Frame<'_>> + '_ {
        (0..self.order.len()).filter_map(move |i| self.frame(i))
    }

    /// Play the sequence back to front. Only the order changes, never the pixels.
    pub fn reverse(&mut self) {
        self.order.reverse();
    }

    /// Copy every frame out of the arena, in playback order.
    pub fn to_frame_buffers(&self) -> Vec<FrameBuffer> {
        self.frames().map(|f| f.to_frame_buffer()).collect()
    }

    /// Release the backing arena, returning the number of bytes freed.
    pub fn release(self) -> usize {
        self.arena.release()
    }
}

/// Cooperative cancellation flag, checked between frames.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// `Err(Cancelled)` once [`cancel`](Self::cancel) has been called.
    pub fn check(&self) -> BurstResult<()> {
        if self.is_cancelled() {
            Err(BurstError::Cancelled)
        } else {
            Ok(())
        }
    }
}
