/// Sample rate of the PS3 Eye microphone array in Hz.
pub const MIC_SAMPLE_RATE: u32 = 16_000;

/// Number of microphone capsules (raw channels) in the array.
pub const MIC_CHANNELS: usize = 4;

/// Full-scale magnitude of a signed 16-bit sample (`1 << 15`).
pub const SAMPLE_FULL_SCALE: f32 = 32_768.0;

/// Number of leading raw channels averaged into the derived sum channel.
pub const SUM_SOURCE_CHANNELS: usize = 4;

/// Longest history an [`AudioHistory`](crate::mic::AudioHistory) keeps,
/// in frames per channel (one minute at [`MIC_SAMPLE_RATE`]).
pub const MAX_HISTORY_FRAMES: usize = MIC_SAMPLE_RATE as usize * 60;
