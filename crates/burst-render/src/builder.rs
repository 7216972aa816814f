//! Frame set builder.
//!
//! Assembles the full animation for one source image: the original, one
//! distortion frame per scheduled level, then the decorative frames resized
//! to the source resolution. Every frame lives in a single arena owned by the
//! returned [`FrameSequence`]. Reverse playback reorders the finished frames;
//! it never re-derives them.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rayon::prelude::*;

use burst_core::{
    BurstError, BurstResult, CancelToken, DistortionLevel, FrameArena, FrameBuffer, FrameSequence,
};

use crate::decor::DecorSet;
use crate::distort::distort_into;
use crate::resize::resize_into;

/// Frames contributed by the distortion pass: the original plus one per level.
pub const DISTORTION_FRAMES: usize = 1 + DistortionLevel::SCHEDULE.len();

/// What to write into one arena slot.
#[derive(Clone, Copy)]
enum FrameJob<'a> {
    Original,
    Distort(DistortionLevel),
    Decor(usize, &'a FrameBuffer),
}

/// Called with `(frames_done, frames_total)` after each frame is written.
pub type FrameCallback<'a> = &'a (dyn Fn(usize, usize) + Sync);

/// Configurable sequence builder.
#[derive(Clone)]
pub struct SequenceBuilder<'a> {
    decor: &'a DecorSet,
    reverse: bool,
    parallel: bool,
    cancel: Option<CancelToken>,
    on_frame: Option<FrameCallback<'a>>,
}

impl<'a> SequenceBuilder<'a> {
    /// Builder using `decor` for the trailing frames. Forward, parallel, not cancellable.
    pub fn new(decor: &'a DecorSet) -> Self {
        Self {
            decor,
            reverse: false,
            parallel: true,
            cancel: None,
            on_frame: None,
        }
    }

    /// Play the finished sequence back to front.
    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Generate frames on the rayon pool instead of the calling thread.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Abort with [`BurstError::Cancelled`] once `token` is cancelled.
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Report progress through `callback`. On the parallel path frames finish
    /// out of order, so only the count is meaningful.
    pub fn on_frame(mut self, callback: FrameCallback<'a>) -> Self {
        self.on_frame = Some(callback);
        self
    }

    /// Length of every sequence this builder produces.
    pub fn frame_count(&self) -> usize {
        DISTORTION_FRAMES + self.decor.len()
    }

    fn jobs(&self) -> Vec<FrameJob<'a>> {
        let mut jobs = Vec::with_capacity(self.frame_count());
        jobs.push(FrameJob::Original);
        jobs.extend(DistortionLevel::SCHEDULE.iter().map(|l| FrameJob::Distort(*l)));
        jobs.extend(
            self.decor
                .frames()
                .iter()
                .enumerate()
                .map(|(i, f)| FrameJob::Decor(i, f)),
        );
        jobs
    }

    /// Build the frame sequence for `image`.
    pub fn build(&self, image: &FrameBuffer) -> BurstResult<FrameSequence> {
        if image.is_empty() {
            return Err(BurstError::InvalidArgument(format!(
                "cannot build a sequence from a {}x{} image",
                image.width, image.height
            )));
        }
        if image.data.len() != FrameBuffer::byte_len(image.width, image.height) {
            return Err(BurstError::InvalidArgument(format!(
                "{}x{} image carries {} bytes",
                image.width,
                image.height,
                image.data.len()
            )));
        }

        let start = Instant::now();
        let jobs = self.jobs();
        let mut arena = FrameArena::with_capacity(image.width, image.height, jobs.len())?;
        let done = AtomicUsize::new(0);

        let order = if self.parallel {
            let batch = arena.alloc_batch(jobs.len());
            let order = batch.slots();
            let chunks = batch.into_chunks();
            jobs.par_iter()
                .zip(chunks.into_par_iter())
                .try_for_each(|(job, dst)| {
                    self.run_job(job, image, dst)?;
                    self.report(&done, jobs.len());
                    Ok::<(), BurstError>(())
                })?;
            order
        } else {
            let mut order = Vec::with_capacity(jobs.len());
            for job in &jobs {
                // Check before growing so a cancelled export stops allocating.
                self.check_cancelled()?;
                let (slot, dst) = arena.alloc();
                self.run_job(job, image, dst)?;
                order.push(slot);
                self.report(&done, jobs.len());
            }
            order
        };

        let mut sequence = FrameSequence::new(arena, order)?;
        if self.reverse {
            sequence.reverse();
        }

        tracing::info!(
            "Built {} frames at {}x{} ({} bytes, {}, {}) in {:.1?}",
            sequence.len(),
            sequence.width(),
            sequence.height(),
            sequence.allocated_bytes(),
            if self.reverse { "implode" } else { "explode" },
            if self.parallel { "parallel" } else { "sequential" },
            start.elapsed(),
        );

        Ok(sequence)
    }

    fn check_cancelled(&self) -> BurstResult<()> {
        match &self.cancel {
            Some(token) => token.check(),
            None => Ok(()),
        }
    }

    fn report(&self, done: &AtomicUsize, total: usize) {
        let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
        if let Some(callback) = self.on_frame {
            callback(finished, total);
        }
    }

    fn run_job(&self, job: &FrameJob<'_>, image: &FrameBuffer, dst: &mut [u8]) -> BurstResult<()> {
        self.check_cancelled()?;
        match *job {
            FrameJob::Original => dst.copy_from_slice(&image.data),
            FrameJob::Distort(level) => {
                tracing::debug!("Distortion frame at level {:.3}", level.value());
                distort_into(image, level, dst);
            }
            FrameJob::Decor(index, asset) => {
                tracing::debug!(
                    "Decor frame {} resized {}x{} -> {}x{}",
                    index,
                    asset.width,
                    asset.height,
                    image.width,
                    image.height
                );
                resize_into(asset, image.width, image.height, dst)?;
            }
        }
        Ok(())
    }
}

/// Build the explode (or, with `reverse`, implode) sequence for `image`
/// using the built-in decorative frames.
pub fn build_sequence(image: &FrameBuffer, reverse: bool) -> BurstResult<FrameSequence> {
    SequenceBuilder::new(DecorSet::builtin())
        .reverse(reverse)
        .build(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decor::BUILTIN_DECOR_FRAMES;
    use crate::distort::distort;
    use burst_core::hash::hash_sequence;
    use burst_core::Color;

    fn small_decor() -> DecorSet {
        DecorSet::from_frames(vec![
            FrameBuffer::solid(3, 3, &Color::GREEN),
            FrameBuffer::solid(9, 2, &Color::BLUE),
        ])
        .unwrap()
    }

    fn checker(width: u32, height: u32) -> FrameBuffer {
        FrameBuffer::from_fn(width, height, |x, y| {
            if (x + y) % 2 == 0 {
                [255, 255, 255, 255]
            } else {
                [x as u8, y as u8, 40, 200]
            }
        })
    }

    #[test]
    fn test_frame_count_constant() {
        assert_eq!(DISTORTION_FRAMES, 9);
        let builder = SequenceBuilder::new(DecorSet::builtin());
        assert_eq!(builder.frame_count(), 9 + BUILTIN_DECOR_FRAMES);
    }

    #[test]
    fn test_layout_original_then_levels_then_decor() {
        let decor = small_decor();
        let img = checker(12, 10);
        let seq = SequenceBuilder::new(&decor).parallel(false).build(&img).unwrap();

        assert_eq!(seq.len(), 11);
        assert_eq!(seq.frame(0).unwrap().data, &img.data[..]);
        for (i, level) in DistortionLevel::SCHEDULE.iter().enumerate() {
            assert_eq!(seq.frame(i + 1).unwrap().data, &distort(&img, *level).data[..]);
        }
        assert_eq!(seq.frame(9).unwrap().get_pixel(11, 9), Some([0, 255, 0, 255]));
        assert_eq!(seq.frame(10).unwrap().get_pixel(0, 0), Some([0, 0, 255, 255]));
    }

    #[test]
    fn test_all_frames_share_source_size() {
        let decor = small_decor();
        let seq = SequenceBuilder::new(&decor).build(&checker(7, 5)).unwrap();
        for frame in seq.frames() {
            assert_eq!((frame.width, frame.height), (7, 5));
            assert_eq!(frame.data.len(), 7 * 5 * 4);
        }
    }

    #[test]
    fn test_reverse_is_exact_reordering() {
        let decor = small_decor();
        let img = checker(8, 8);
        let forward = SequenceBuilder::new(&decor).build(&img).unwrap();
        let backward = SequenceBuilder::new(&decor).reverse(true).build(&img).unwrap();
        assert_eq!(forward.len(), backward.len());
        let n = forward.len();
        for i in 0..n {
            assert_eq!(forward.frame(i).unwrap().data, backward.frame(n - 1 - i).unwrap().data);
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let decor = small_decor();
        let img = checker(16, 9);
        let par = SequenceBuilder::new(&decor).parallel(true).build(&img).unwrap();
        let seq = SequenceBuilder::new(&decor).parallel(false).build(&img).unwrap();
        assert_eq!(hash_sequence(&par), hash_sequence(&seq));
    }

    #[test]
    fn test_empty_image_rejected() {
        let decor = small_decor();
        for img in [FrameBuffer::new(0, 4), FrameBuffer::new(4, 0)] {
            let result = SequenceBuilder::new(&decor).build(&img);
            assert!(matches!(result, Err(BurstError::InvalidArgument(_))));
        }
    }

    #[test]
    fn test_malformed_image_rejected() {
        let img = FrameBuffer {
            data: vec![0; 3],
            width: 2,
            height: 2,
        };
        assert!(build_sequence(&img, false).is_err());
    }

    #[test]
    fn test_cancelled_build() {
        let decor = small_decor();
        let token = CancelToken::new();
        token.cancel();
        for parallel in [false, true] {
            let result = SequenceBuilder::new(&decor)
                .parallel(parallel)
                .cancel_token(token.clone())
                .build(&checker(4, 4));
            assert!(matches!(result, Err(BurstError::Cancelled)));
        }
    }

    #[test]
    fn test_cancel_midway_stops_sequential_build() {
        let decor = small_decor();
        let token = CancelToken::new();
        let calls = AtomicUsize::new(0);
        let trip = token.clone();
        let callback = |done: usize, _total: usize| {
            calls.fetch_add(1, Ordering::SeqCst);
            if done == 3 {
                trip.cancel();
            }
        };

        let result = SequenceBuilder::new(&decor)
            .parallel(false)
            .cancel_token(token.clone())
            .on_frame(&callback)
            .build(&checker(6, 6));

        assert!(matches!(result, Err(BurstError::Cancelled)));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_on_frame_counts_every_frame() {
        let decor = small_decor();
        let seen = AtomicUsize::new(0);
        let callback = |done: usize, total: usize| {
            assert_eq!(total, 11);
            seen.fetch_max(done, Ordering::SeqCst);
        };
        for parallel in [false, true] {
            seen.store(0, Ordering::SeqCst);
            let seq = SequenceBuilder::new(&decor)
                .parallel(parallel)
                .on_frame(&callback)
                .build(&checker(5, 5))
                .unwrap();
            assert_eq!(seq.len(), 11);
            assert_eq!(seen.load(Ordering::SeqCst), 11);
        }
    }

    #[test]
    fn test_empty_decor_gives_distortion_frames_only() {
        let decor = DecorSet::from_frames(Vec::new()).unwrap();
        let seq = SequenceBuilder::new(&decor).build(&checker(3, 3)).unwrap();
        assert_eq!(seq.len(), DISTORTION_FRAMES);
    }

    #[test]
    fn test_release_frees_whole_arena() {
        let decor = small_decor();
        let seq = SequenceBuilder::new(&decor).build(&checker(4, 4)).unwrap();
        assert_eq!(seq.release(), 11 * 4 * 4 * 4);
    }
}
