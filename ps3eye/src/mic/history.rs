//! Fixed-duration rolling history of microphone samples.
//!
//! [`AudioHistory`] keeps the last `capacity` frames of every raw channel as
//! normalized `f32` samples, plus an optional derived channel holding the
//! mean of the first four raw channels. All storage is allocated in
//! [`new()`](AudioHistory::new); [`push()`](AudioHistory::push) never
//! allocates.
//!
//! ## Layout
//!
//! ```text
//! samples: [ ch0 slot 0..cap | ch1 slot 0..cap | ... | sum slot 0..cap ]
//!                    ▲
//!               write_index (shared by every channel)
//! ```
//!
//! Once full, the oldest sample of each channel sits at `write_index`.
//! Before that, slots `0..count` hold the samples in push order.

use alloc::boxed::Box;
use alloc::vec;

use crate::constants::{MAX_HISTORY_FRAMES, SUM_SOURCE_CHANNELS};

use super::frame::AudioFrame;

/// Per-channel circular history for `C` raw channels.
pub struct AudioHistory<const C: usize> {
    /// Channel-major sample storage, `channel_count() * capacity` long.
    samples: Box<[f32]>,
    capacity: usize,
    count: usize,
    write_index: usize,
    derive_sum: bool,
}

impl<const C: usize> AudioHistory<C> {
    /// Allocate a history holding `duration_secs` of audio at `sample_rate`.
    ///
    /// Capacity is `floor(duration_secs * sample_rate)` frames with a floor
    /// of one frame, so a zero, negative or NaN duration still yields a
    /// usable buffer. Durations past [`MAX_HISTORY_FRAMES`] (infinity
    /// included) are capped. With `derive_sum`, one extra channel is
    /// allocated at index `C`.
    pub fn new(duration_secs: f32, sample_rate: u32, derive_sum: bool) -> Self {
        let frames = libm::floorf(duration_secs * sample_rate as f32);
        let capacity = if frames >= 1.0 { frames as usize } else { 1 };
        Self::with_capacity(capacity, derive_sum)
    }

    /// Allocate a history holding `capacity` frames, clamped to
    /// `1..=MAX_HISTORY_FRAMES`.
    pub fn with_capacity(capacity: usize, derive_sum: bool) -> Self {
        let capacity = capacity.clamp(1, MAX_HISTORY_FRAMES);
        let channels = C + derive_sum as usize;
        Self {
            samples: vec![0.0; channels * capacity].into_boxed_slice(),
            capacity,
            count: 0,
            write_index: 0,
            derive_sum,
        }
    }

    /// Frames per channel.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Valid frames per channel (saturates at capacity).
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether no frame has been pushed since creation or the last clear.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Whether every slot holds a pushed frame.
    pub fn is_full(&self) -> bool {
        self.count == self.capacity
    }

    /// Slot the next frame will be written to.
    pub fn write_index(&self) -> usize {
        self.write_index
    }

    /// Stored channels: `C`, plus one when the sum channel is derived.
    pub fn channel_count(&self) -> usize {
        C + self.derive_sum as usize
    }

    /// Index of the derived sum channel, if enabled.
    pub fn sum_channel(&self) -> Option<usize> {
        self.derive_sum.then_some(C)
    }

    /// Append a batch of frames.
    ///
    /// A batch longer than the capacity skips the frames that would be
    /// overwritten within the same call. The write index still advances by
    /// the full batch length, so the result is identical to writing every
    /// frame. An empty batch is a no-op.
    pub fn push(&mut self, frames: &[AudioFrame<C>]) {
        let skip = frames.len().saturating_sub(self.capacity);
        if skip > 0 {
            self.write_index = (self.write_index + skip) % self.capacity;
        }
        for frame in &frames[skip..] {
            self.write_frame(frame);
        }
    }

    fn write_frame(&mut self, frame: &AudioFrame<C>) {
        let cap = self.capacity;
        let idx = self.write_index;

        for c in 0..C {
            self.samples[c * cap + idx] = frame.normalized(c);
        }

        if self.derive_sum {
            let sources = C.min(SUM_SOURCE_CHANNELS);
            if sources > 0 {
                let sum: f32 = (0..sources).map(|c| self.samples[c * cap + idx]).sum();
                self.samples[C * cap + idx] = sum / sources as f32;
            }
        }

        if self.count < cap {
            self.count += 1;
        }
        self.write_index += 1;
        if self.write_index == cap {
            self.write_index = 0;
        }
    }

    /// Raw slots of `channel` in storage order.
    ///
    /// # Panics
    ///
    /// Panics if `channel >= channel_count()`.
    pub fn slots(&self, channel: usize) -> &[f32] {
        assert!(channel < self.channel_count(), "channel {channel} out of range");
        let start = channel * self.capacity;
        &self.samples[start..start + self.capacity]
    }

    /// Valid samples of `channel`, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if `channel >= channel_count()`.
    pub fn iter_channel(&self, channel: usize) -> impl Iterator<Item = f32> + '_ {
        let slots = self.slots(channel);
        let (older, newer) = if self.is_full() {
            let (head, tail) = slots.split_at(self.write_index);
            (tail, head)
        } else {
            (&slots[..self.count], &slots[..0])
        };
        older.iter().chain(newer.iter()).copied()
    }

    /// Copy the valid samples of `channel`, oldest first, into `out`.
    /// Returns the number of samples copied (`min(len(), out.len())`).
    ///
    /// # Panics
    ///
    /// Panics if `channel >= channel_count()`.
    pub fn copy_channel(&self, channel: usize, out: &mut [f32]) -> usize {
        let mut n = 0;
        for (dst, src) in out.iter_mut().zip(self.iter_channel(channel)) {
            *dst = src;
            n += 1;
        }
        n
    }

    /// Most recent sample of `channel`, if any frame has been pushed.
    pub fn latest(&self, channel: usize) -> Option<f32> {
        if self.is_empty() {
            return None;
        }
        let idx = if self.write_index == 0 { self.capacity - 1 } else { self.write_index - 1 };
        Some(self.slots(channel)[idx])
    }

    /// Forget all frames and zero the storage.
    pub fn clear(&mut self) {
        self.samples.fill(0.0);
        self.count = 0;
        self.write_index = 0;
    }
}
