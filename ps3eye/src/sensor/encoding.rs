//! Pure encodings from logical parameter values to register bytes.
//!
//! Everything here is free of bus access so each table and formula can be
//! checked on its own.

use core::f64::consts::PI;

use super::params::Resolution;

// ── Gain ───────────────────────────────────────────────────────────────────

/// One gain range. The input's bits 5:4 select the tier; the tier's range
/// bits are OR'd onto the low nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GainTier {
    /// Value of `input & 0x30` that selects this tier.
    pub select: u8,
    /// Bits OR'd onto the fine gain nibble.
    pub range_bits: u8,
}

/// Gain range table, indexed by `(input & 0x30) >> 4`.
pub const GAIN_TIERS: [GainTier; 4] = [
    GainTier { select: 0x00, range_bits: 0x00 },
    GainTier { select: 0x10, range_bits: 0x30 },
    GainTier { select: 0x20, range_bits: 0x70 },
    GainTier { select: 0x30, range_bits: 0xF0 },
];

/// Map a logical gain to the GAIN register byte.
///
/// Only bits 0..=5 take part in the remap, so every `u8` is a valid input.
pub fn gain_register(value: u8) -> u8 {
    let tier = GAIN_TIERS[((value & 0x30) >> 4) as usize];
    (value & 0x0F) | tier.range_bits
}

// ── Exposure ───────────────────────────────────────────────────────────────

/// Largest logical exposure whose high part still fits in AECH.
pub const EXPOSURE_MAX: u16 = 0x7FFF;

/// Split an exposure value into `(AECH, AEC)` bytes.
pub fn exposure_registers(exposure: u16) -> (u8, u8) {
    ((exposure >> 7) as u8, (exposure << 1) as u8)
}

// ── Hue ────────────────────────────────────────────────────────────────────

/// Logical hue that maps to a zero offset.
pub const HUE_CENTER: u8 = 90;

/// Largest logical hue (offset +90).
pub const HUE_MAX: u8 = 180;

/// How the hue offset is turned into the HUECOS/HUESIN/SIGN triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HueEncoding {
    /// Matches shipped firmware byte for byte: sine and cosine are taken of
    /// the offset as a raw number (no degree conversion), products are
    /// truncated and wrapped into a byte, and the sign bit is always
    /// cleared.
    #[default]
    Literal,
    /// Treat the offset as degrees: rounded magnitudes in HUECOS/HUESIN and
    /// the sign bit set when the sine term is negative.
    Degrees,
}

/// Register bytes for one hue setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HueRegisters {
    /// HUECOS byte.
    pub cos: u8,
    /// HUESIN byte.
    pub sin: u8,
    /// State of SIGN bit 1.
    pub sin_negative: bool,
}

/// Encode a logical hue (0..=180, clamped) with the given encoding.
pub fn hue_registers(hue: u8, encoding: HueEncoding) -> HueRegisters {
    let offset = (hue.min(HUE_MAX) as i32 - HUE_CENTER as i32) as f64;
    match encoding {
        HueEncoding::Literal => HueRegisters {
            cos: truncate_to_byte(libm::cos(offset) * 128.0),
            sin: truncate_to_byte(libm::sin(offset) * 128.0),
            sin_negative: false,
        },
        HueEncoding::Degrees => {
            let theta = offset * PI / 180.0;
            let sin = libm::round(libm::sin(theta) * 128.0);
            let cos = libm::round(libm::cos(theta) * 128.0);
            HueRegisters {
                cos: magnitude_byte(cos),
                sin: magnitude_byte(sin),
                sin_negative: sin < 0.0,
            }
        }
    }
}

/// Truncate toward zero, then keep the low byte of the two's-complement value.
fn truncate_to_byte(value: f64) -> u8 {
    value as i32 as u8
}

fn magnitude_byte(value: f64) -> u8 {
    libm::fabs(value).min(255.0) as u8
}

// ── Frame rate ─────────────────────────────────────────────────────────────

/// Frame rates the bridge can clock at 640×480, fastest first.
pub const VGA_FRAMERATES: [u16; 14] = [83, 75, 60, 50, 40, 30, 25, 20, 15, 10, 8, 5, 3, 2];

/// Frame rates the bridge can clock at 320×240, fastest first.
pub const QVGA_FRAMERATES: [u16; 22] = [
    290, 205, 187, 150, 137, 125, 100, 90, 75, 60, 50, 40, 37, 30, 17, 15, 12, 10, 7, 5, 3, 2,
];

/// Supported rates for `resolution`, fastest first.
pub fn framerates(resolution: Resolution) -> &'static [u16] {
    match resolution {
        Resolution::Vga => &VGA_FRAMERATES,
        Resolution::Qvga => &QVGA_FRAMERATES,
    }
}

/// Snap `fps` to the fastest supported rate not above it, or to the slowest
/// rate when the request is below every entry.
pub fn normalize_framerate(resolution: Resolution, fps: u16) -> u16 {
    let table = framerates(resolution);
    table
        .iter()
        .copied()
        .find(|&rate| fps >= rate)
        .unwrap_or(table[table.len() - 1])
}
