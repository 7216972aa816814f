//! Content hashing for deterministic output verification.
//!
//! Produces a SHA-256 hash of frame data so that two builds of the same
//! source (forward vs. reversed, sequential vs. parallel) can be compared
//! bit-exactly.

use sha2::{Digest, Sha256};

use crate::frame::FrameBuffer;
use crate::sequence::FrameSequence;

/// A content hash digest (SHA-256, 32 bytes).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash {
    bytes: [u8; 32],
}

impl ContentHash {
    /// Create from raw bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Get the hash as a hex string.
    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

fn update_frame(hasher: &mut Sha256, width: u32, height: u32, data: &[u8]) {
    // Dimensions go in first so equal bytes at different sizes differ.
    hasher.update(width.to_le_bytes());
    hasher.update(height.to_le_bytes());
    hasher.update(data);
}

fn finish(hasher: Sha256) -> ContentHash {
    let result = hasher.finalize();
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&result);
    ContentHash::from_bytes(bytes)
}

/// Compute the content hash of a single frame buffer.
pub fn hash_frame(frame: &FrameBuffer) -> ContentHash {
    let mut hasher = Sha256::new();
    update_frame(&mut hasher, frame.width, frame.height, &frame.data);
    finish(hasher)
}

/// Compute the content hash of a list of frame buffers, in order.
pub fn hash_frames(frames: &[FrameBuffer]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update((frames.len() as u64).to_le_bytes());
    for frame in frames {
        update_frame(&mut hasher, frame.width, frame.height, &frame.data);
    }
    finish(hasher)
}

/// Compute the content hash of a frame sequence in playback order.
///
/// Agrees with [`hash_frames`] over the same frames.
pub fn hash_sequence(sequence: &FrameSequence) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update((sequence.len() as u64).to_le_bytes());
    for frame in sequence.frames() {
        update_frame(&mut hasher, frame.width, frame.height, frame.data);
    }
    finish(hasher)
}
