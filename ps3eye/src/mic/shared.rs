//! Producer/consumer sharing for [`AudioHistory`].
//!
//! The delivery callback pushes from the real-time context while display
//! or analysis code reads from another. Both sides go through a
//! [`critical_section::Mutex`], held for one batch on the producer side and
//! one channel copy on the consumer side. Neither path allocates.
//!
//! ```ignore
//! let shared = SharedHistory::new(AudioHistory::<4>::new(0.5, MIC_SAMPLE_RATE, true));
//!
//! // Audio callback:
//! shared.handle_audio_data(frames);
//!
//! // Display thread:
//! let mut scratch = [0.0f32; 8000];
//! let n = shared.snapshot(4, &mut scratch);
//! draw(&scratch[..n]);
//! ```

use core::cell::RefCell;

use critical_section::Mutex;

use super::frame::{AudioCallback, AudioFrame};
use super::history::AudioHistory;

/// An [`AudioHistory`] that can be shared between the producer callback and
/// consumers on other threads or interrupt priorities.
pub struct SharedHistory<const C: usize> {
    inner: Mutex<RefCell<AudioHistory<C>>>,
}

impl<const C: usize> SharedHistory<C> {
    /// Wrap `history` for sharing.
    pub fn new(history: AudioHistory<C>) -> Self {
        Self { inner: Mutex::new(RefCell::new(history)) }
    }

    /// Append a batch of frames (producer side).
    pub fn push(&self, frames: &[AudioFrame<C>]) {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).push(frames));
    }

    /// Copy the valid samples of `channel`, oldest first, into `out`.
    /// Returns the number of samples copied.
    ///
    /// Each call is its own critical section, so a push may land between
    /// two snapshots. To copy several channels from the same state (for
    /// example the raw channels together with the sum channel), copy them
    /// all inside one [`with()`](Self::with) call.
    ///
    /// # Panics
    ///
    /// Panics if `channel` is not a stored channel.
    pub fn snapshot(&self, channel: usize, out: &mut [f32]) -> usize {
        critical_section::with(|cs| self.inner.borrow_ref(cs).copy_channel(channel, out))
    }

    /// Run `f` against a consistent view of the history.
    ///
    /// `f` runs inside the critical section; keep it short.
    pub fn with<R>(&self, f: impl FnOnce(&AudioHistory<C>) -> R) -> R {
        critical_section::with(|cs| f(&*self.inner.borrow_ref(cs)))
    }

    /// Number of valid frames per channel.
    pub fn len(&self) -> usize {
        self.with(|h| h.len())
    }

    /// Whether no frame has been pushed since creation or the last clear.
    pub fn is_empty(&self) -> bool {
        self.with(|h| h.is_empty())
    }

    /// Forget all frames.
    pub fn clear(&self) {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).clear());
    }

    /// Unwrap the history.
    pub fn into_inner(self) -> AudioHistory<C> {
        self.inner.into_inner().into_inner()
    }
}

impl<const C: usize> AudioCallback<C> for SharedHistory<C> {
    fn handle_audio_data(&self, frames: &[AudioFrame<C>]) {
        self.push(frames);
    }
}
