//! Cached logical parameter set and sensor configuration.

use crate::diagnostics::Diagnostics;

use super::encoding::HueEncoding;

/// Output resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Resolution {
    /// 320×240.
    Qvga = 0,
    /// 640×480.
    #[default]
    Vga = 1,
}

impl Resolution {
    /// Decode a raw resolution code. Anything that is not QVGA is VGA.
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Resolution::Qvga,
            _ => Resolution::Vga,
        }
    }

    /// Frame dimensions as `(width, height)`.
    pub const fn size(self) -> (u32, u32) {
        match self {
            Resolution::Vga => (640, 480),
            Resolution::Qvga => (320, 240),
        }
    }
}

/// Cached values of every logical camera parameter.
///
/// The controller updates a field only after the register transactions
/// for it have succeeded, so the cache reflects what the sensor holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parameters {
    /// Automatic gain control.
    pub auto_gain: bool,
    /// Automatic white balance.
    pub awb: bool,
    /// Automatic exposure control.
    pub aec: bool,
    /// Manual exposure, 0..=0x7FFF.
    pub exposure: u16,
    /// Manual gain before the tier remap.
    pub gain: u8,
    pub brightness: u8,
    pub contrast: u8,
    /// Written to both U and V saturation.
    pub saturation: u8,
    /// Written to both de-noise thresholds.
    pub sharpness: u8,
    /// Logical hue, 0..=180 with 90 as neutral.
    pub hue: u8,
    /// AWB red gain.
    pub red_balance: u8,
    /// AWB green gain.
    pub green_balance: u8,
    /// AWB blue gain.
    pub blue_balance: u8,
    /// Horizontal mirror.
    pub flip_h: bool,
    /// Vertical flip.
    pub flip_v: bool,
    /// Output resolution.
    pub resolution: Resolution,
    /// Frames per second, always a member of the resolution's rate table.
    pub framerate: u16,
    /// Color bar test pattern.
    pub test_pattern: bool,
    /// Set while the transport streams; blocks format changes.
    pub streaming: bool,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            auto_gain: false,
            awb: false,
            aec: false,
            exposure: 120,
            gain: 20,
            brightness: 20,
            contrast: 37,
            saturation: 40,
            sharpness: 0,
            hue: 143,
            red_balance: 128,
            green_balance: 128,
            blue_balance: 128,
            flip_h: false,
            flip_v: false,
            resolution: Resolution::Vga,
            framerate: 60,
            test_pattern: false,
            streaming: false,
        }
    }
}

/// Session configuration for [`Ov7725`](super::Ov7725).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorConfig {
    /// Initial output resolution.
    pub resolution: Resolution,
    /// Requested frame rate; normalized against the resolution's table.
    pub framerate: u16,
    /// Byte encoding used for hue writes.
    pub hue_encoding: HueEncoding,
    /// Register tracing for this session.
    pub diagnostics: Diagnostics,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            resolution: Resolution::Vga,
            framerate: 60,
            hue_encoding: HueEncoding::Literal,
            diagnostics: Diagnostics::quiet(),
        }
    }
}
