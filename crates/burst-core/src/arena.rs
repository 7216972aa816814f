//! Bulk frame arena.
//!
//! One growable byte region that backs every frame produced during a single
//! export. Frames are carved out as fixed-size slots, all sharing the
//! arena's dimensions. Slots are never freed individually: the whole region
//! is released at once by [`FrameArena::release`] (or on drop).

use crate::{BurstError, BurstResult, FrameBuffer};

/// Handle to one frame slot inside a [`FrameArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameSlot(usize);

impl FrameSlot {
    /// Zero-based allocation index of this slot.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Append-only store of same-shaped RGBA8 frames.
#[derive(Debug)]
pub struct FrameArena {
    width: u32,
    height: u32,
    frame_bytes: usize,
    storage: Vec<u8>,
    slots: usize,
}

/// A run of freshly allocated, zero-filled slots handed out for writing.
///
/// The chunks are disjoint, so they can be filled from worker threads while
/// the arena itself stays with its owner.
pub struct FrameBatch<'a> {
    first: usize,
    frame_bytes: usize,
    region: &'a mut [u8],
}

impl FrameArena {
    /// Create an empty arena for frames of the given dimensions.
    pub fn new(width: u32, height: u32) -> BurstResult<Self> {
        Self::with_capacity(width, height, 0)
    }

    /// Create an empty arena with room reserved for `frames` frames.
    pub fn with_capacity(width: u32, height: u32, frames: usize) -> BurstResult<Self> {
        if width == 0 || height == 0 {
            return Err(BurstError::InvalidArgument(format!(
                "cannot allocate {}x{} frames",
                width, height
            )));
        }
        let frame_bytes = FrameBuffer::byte_len(width, height);
        Ok(Self {
            width,
            height,
            frame_bytes,
            storage: Vec::with_capacity(frame_bytes * frames),
            slots: 0,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes occupied by a single frame slot.
    pub fn frame_bytes(&self) -> usize {
        self.frame_bytes
    }

    /// Number of slots allocated so far.
    pub fn len(&self) -> usize {
        self.slots
    }

    pub fn is_empty(&self) -> bool {
        self.slots == 0
    }

    /// Total bytes currently held by the arena.
    pub fn allocated_bytes(&self) -> usize {
        self.storage.len()
    }

    /// Allocate one zero-filled slot and return it for writing.
    pub fn alloc(&mut self) -> (FrameSlot, &mut [u8]) {
        let slot = FrameSlot(self.slots);
        let start = self.storage.len();
        self.storage.resize(start + self.frame_bytes, 0);
        self.slots += 1;
        (slot, &mut self.storage[start..])
    }

    /// Allocate one slot holding a copy of `data`.
    pub fn alloc_copy(&mut self, data: &[u8]) -> BurstResult<FrameSlot> {
        if data.len() != self.frame_bytes {
            return Err(BurstError::InvalidArgument(format!(
                "frame of {} bytes does not fit a {}x{} arena slot ({} bytes)",
                data.len(),
                self.width,
                self.height,
                self.frame_bytes
            )));
        }
        let slot = FrameSlot(self.slots);
        self.storage.extend_from_slice(data);
        self.slots += 1;
        Ok(slot)
    }

    /// Allocate `count` zero-filled slots at once.
    pub fn alloc_batch(&mut self, count: usize) -> FrameBatch<'_> {
        let first = self.slots;
        let start = self.storage.len();
        self.storage.resize(start + count * self.frame_bytes, 0);
        self.slots += count;
        FrameBatch {
            first,
            frame_bytes: self.frame_bytes,
            region: &mut self.storage[start..],
        }
    }

    /// Read access to a slot. Returns None for slots this arena never handed out.
    pub fn get(&self, slot: FrameSlot) -> Option<&[u8]> {
        if slot.0 >= self.slots {
            return None;
        }
        let start = slot.0 * self.frame_bytes;
        Some(&self.storage[start..start + self.frame_bytes])
    }

    /// Release every frame at once, returning the number of bytes freed.
    pub fn release(self) -> usize {
        let bytes = self.storage.len();
        tracing::debug!(
            "Released frame arena: {} frames, {} bytes ({}x{})",
            self.slots,
            bytes,
            self.width,
            self.height
        );
        bytes
    }
}

impl<'a> FrameBatch<'a> {
    /// Number of slots in the batch.
    pub fn len(&self) -> usize {
        self.region.len() / self.frame_bytes
    }

    pub fn is_empty(&self) -> bool {
        self.region.is_empty()
    }

    /// Slot handles, in allocation order.
    pub fn slots(&self) -> Vec<FrameSlot> {
        (self.first..self.first + self.len()).map(FrameSlot).collect()
    }

    /// Split the batch into one writable chunk per slot, in allocation order.
    pub fn into_chunks(self) -> Vec<&'a mut [u8]> {
        let FrameBatch {
            frame_bytes,
            region,
            ..
        } = self;
        region.chunks_exact_mut(frame_bytes).collect()
    }
}
