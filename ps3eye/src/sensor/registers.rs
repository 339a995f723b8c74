//! OV7725 register addresses and bitfield definitions.
//!
//! Only the registers the parameter controller touches are listed. All
//! registers are 8-bit with 8-bit addresses.

// ── Bus address ────────────────────────────────────────────────────────────

/// 7-bit SCCB address of the sensor (0x42 write / 0x43 read on the wire).
pub const SCCB_ADDR: u8 = 0x21;

// ── Gain and white-balance channel gains ───────────────────────────────────

/// AGC gain control.
/// - Bits 7:4 — gain range selection (see [`super::encoding::GAIN_TIERS`])
/// - Bits 3:0 — fine gain
pub const GAIN: u8 = 0x00;

/// AWB blue channel gain.
pub const BLUE: u8 = 0x01;

/// AWB red channel gain.
pub const RED: u8 = 0x02;

/// AWB green channel gain.
pub const GREEN: u8 = 0x03;

// ── Exposure ───────────────────────────────────────────────────────────────

/// Exposure value, high bits (`exposure >> 7`).
pub const AECH: u8 = 0x08;

/// Exposure value, low bits (`exposure << 1`).
pub const AEC: u8 = 0x10;

// ── Common control ─────────────────────────────────────────────────────────

/// Common control 3 (output orientation and test pattern).
/// - Bit 7 — vertical flip off (cleared = flipped)
/// - Bit 6 — horizontal mirror off (cleared = mirrored)
/// - Bit 0 — color bar test pattern
pub const COM3: u8 = 0x0C;

/// COM3 bit 7.
pub const COM3_VFLIP_OFF: u8 = 0x80;
/// COM3 bit 6.
pub const COM3_HMIRROR_OFF: u8 = 0x40;
/// COM3 bits 7:6.
pub const COM3_ORIENTATION_MASK: u8 = COM3_VFLIP_OFF | COM3_HMIRROR_OFF;
/// COM3 bit 0.
pub const COM3_COLOR_BAR: u8 = 0x01;

/// Common control 8 (automatic control enables).
/// - Bit 2 — AGC enable
/// - Bit 1 — AWB enable
/// - Bit 0 — AEC enable
pub const COM8: u8 = 0x13;

/// COM8 bit 2.
pub const COM8_AGC: u8 = 0x04;
/// COM8 bit 1.
pub const COM8_AWB: u8 = 0x02;
/// COM8 bit 0.
pub const COM8_AEC: u8 = 0x01;

// ── DSP control ────────────────────────────────────────────────────────────

/// AWB control 0.
/// - Bit 6 — AWB calculate enable
pub const AWB_CTRL0: u8 = 0x63;

/// AWB_CTRL0 bit 6.
pub const AWB_CTRL0_CALC: u8 = 0x40;

/// DSP control 1.
/// - Bits 1:0 — gamma function on/off selection, coupled with AGC
pub const DSP_CTRL1: u8 = 0x64;

/// DSP_CTRL1 bits 1:0.
pub const DSP_CTRL1_GAMMA: u8 = 0x03;

// ── Noise thresholds ───────────────────────────────────────────────────────

/// De-noise threshold (reduced resolution).
pub const DNSTH: u8 = 0x8E;

/// Auto de-noise threshold (full resolution).
pub const ADNSTH: u8 = 0x91;

// ── Tone and color ─────────────────────────────────────────────────────────

/// Brightness.
pub const BRIGHT: u8 = 0x9B;

/// Contrast.
pub const CNST: u8 = 0x9C;

/// U component saturation.
pub const USAT: u8 = 0xA7;

/// V component saturation.
pub const VSAT: u8 = 0xA8;

/// Hue cosine coefficient.
pub const HUECOS: u8 = 0xA9;

/// Hue sine coefficient.
pub const HUESIN: u8 = 0xAA;

/// Sign bits for the UV adjustment.
/// - Bit 1 — hue sine term negative
pub const SIGN: u8 = 0xAB;

/// SIGN bit 1.
pub const SIGN_HUESIN_NEG: u8 = 0x02;
