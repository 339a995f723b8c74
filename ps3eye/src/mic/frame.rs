//! Raw microphone frames and the delivery seam.
//!
//! ## Wire layout
//!
//! The bridge delivers frames as consecutive little-endian `i16` samples,
//! channel 0 first: `[c0_lo, c0_hi, c1_lo, c1_hi, ...]`.

use crate::constants::{MIC_CHANNELS, SAMPLE_FULL_SCALE};

/// One sample per raw channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct AudioFrame<const C: usize> {
    pub channel: [i16; C],
}

/// Frame of the PS3 Eye's four-capsule array.
pub type MicFrame = AudioFrame<MIC_CHANNELS>;

impl<const C: usize> AudioFrame<C> {
    /// Size of one frame on the wire in bytes.
    pub const BYTES: usize = C * 2;

    pub const fn new(channel: [i16; C]) -> Self {
        Self { channel }
    }

    /// Sample of `channel` scaled to [-1.0, 1.0).
    ///
    /// # Panics
    ///
    /// Panics if `channel >= C`.
    pub fn normalized(&self, channel: usize) -> f32 {
        self.channel[channel] as f32 / SAMPLE_FULL_SCALE
    }

    /// Decode one frame from its wire bytes. Returns `None` unless
    /// `bytes.len() == Self::BYTES`.
    pub fn from_le_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != Self::BYTES {
            return None;
        }
        let mut channel = [0i16; C];
        for (sample, pair) in channel.iter_mut().zip(bytes.chunks_exact(2)) {
            *sample = i16::from_le_bytes([pair[0], pair[1]]);
        }
        Some(Self { channel })
    }
}

impl<const C: usize> Default for AudioFrame<C> {
    fn default() -> Self {
        Self { channel: [0; C] }
    }
}

/// Decode every whole frame in `bytes`. A trailing partial frame is ignored.
pub fn decode_frames<const C: usize>(bytes: &[u8]) -> impl Iterator<Item = AudioFrame<C>> + '_ {
    bytes
        .chunks_exact(AudioFrame::<C>::BYTES)
        .filter_map(AudioFrame::<C>::from_le_bytes)
}

/// Receiver for batches of frames from the real-time delivery context.
///
/// Implementations must not allocate or block for an unbounded time.
pub trait AudioCallback<const C: usize> {
    fn handle_audio_data(&self, frames: &[AudioFrame<C>]);
}
