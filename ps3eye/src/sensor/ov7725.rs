//! OV7725 parameter controller.
//!
//! The driver is generic over any [`RegisterBus`]. Every setter returns
//! once its transactions complete and updates the cached value only when
//! they all succeed.
//!
//! # Example
//!
//! ```ignore
//! let mut eye = Ov7725::new(bus, Diagnostics::quiet());
//! eye.set_auto_gain(false)?;
//! eye.set_gain(40)?;
//! eye.set_flip(true, false)?;
//! assert_eq!(eye.gain(), 40);
//! ```

use crate::bus::RegisterBus;
use crate::diagnostics::Diagnostics;

use super::encoding::{self, HueEncoding, EXPOSURE_MAX, HUE_MAX};
use super::error::Error;
use super::params::{Parameters, Resolution, SensorConfig};
use super::registers as reg;

/// OV7725 sensor parameter controller.
///
/// Not internally synchronized: setters take `&mut self`, so sharing one
/// controller between threads requires a mutex or a single control task.
pub struct Ov7725<B> {
    bus: B,
    params: Parameters,
    hue_encoding: HueEncoding,
    diagnostics: Diagnostics,
}

impl<B> Ov7725<B>
where
    B: RegisterBus,
{
    /// Create a controller with default parameters. No bus traffic.
    pub fn new(bus: B, diagnostics: Diagnostics) -> Self {
        Self::with_config(bus, SensorConfig { diagnostics, ..SensorConfig::default() })
    }

    /// Create a controller from a session configuration. No bus traffic;
    /// call [`apply_all()`](Self::apply_all) to push the cache to the sensor.
    pub fn with_config(bus: B, config: SensorConfig) -> Self {
        let params = Parameters {
            resolution: config.resolution,
            framerate: encoding::normalize_framerate(config.resolution, config.framerate),
            ..Parameters::default()
        };
        Self {
            bus,
            params,
            hue_encoding: config.hue_encoding,
            diagnostics: config.diagnostics,
        }
    }

    /// Release the bus.
    pub fn release(self) -> B {
        self.bus
    }

    // ── Low-level register helpers ─────────────────────────────────────

    fn read(&mut self, register: u8) -> Result<u8, Error<B::Error>> {
        let value = self.bus.read(register)?;
        self.diagnostics.register_read(register, value);
        Ok(value)
    }

    fn write(&mut self, register: u8, value: u8) -> Result<(), Error<B::Error>> {
        self.bus.write(register, value)?;
        self.diagnostics.register_write(register, value);
        Ok(())
    }

    /// Read-modify-write: `new = (current & !mask) | (value & mask)`.
    fn modify(&mut self, register: u8, value: u8, mask: u8) -> Result<u8, Error<B::Error>> {
        let current = self.read(register)?;
        let new_val = (current & !mask) | (value & mask);
        self.write(register, new_val)?;
        Ok(new_val)
    }

    fn set_bits(&mut self, register: u8, mask: u8, enable: bool) -> Result<u8, Error<B::Error>> {
        self.modify(register, if enable { mask } else { 0 }, mask)
    }

    // ── Automatic controls ─────────────────────────────────────────────

    /// Enable or disable AGC. The gamma selection bits in DSP_CTRL1 follow
    /// the AGC bit.
    pub fn set_auto_gain(&mut self, enable: bool) -> Result<(), Error<B::Error>> {
        self.set_bits(reg::COM8, reg::COM8_AGC, enable)?;
        self.set_bits(reg::DSP_CTRL1, reg::DSP_CTRL1_GAMMA, enable)?;
        self.params.auto_gain = enable;
        Ok(())
    }

    /// Enable or disable AWB together with its calculation stage.
    pub fn set_awb(&mut self, enable: bool) -> Result<(), Error<B::Error>> {
        self.set_bits(reg::COM8, reg::COM8_AWB, enable)?;
        self.set_bits(reg::AWB_CTRL0, reg::AWB_CTRL0_CALC, enable)?;
        self.params.awb = enable;
        Ok(())
    }

    /// Enable or disable AEC.
    pub fn set_aec(&mut self, enable: bool) -> Result<(), Error<B::Error>> {
        self.set_bits(reg::COM8, reg::COM8_AEC, enable)?;
        self.params.aec = enable;
        Ok(())
    }

    // ── Exposure and gain ──────────────────────────────────────────────

    /// Set the manual exposure. Values above [`EXPOSURE_MAX`] are clamped.
    ///
    /// AECH receives `exposure >> 7`, then AEC receives `exposure << 1`.
    pub fn set_exposure(&mut self, exposure: u16) -> Result<(), Error<B::Error>> {
        let exposure = self.clamp_u16("exposure", exposure, EXPOSURE_MAX);
        let (high, low) = encoding::exposure_registers(exposure);
        self.write(reg::AECH, high)?;
        self.write(reg::AEC, low)?;
        self.params.exposure = exposure;
        Ok(())
    }

    /// Set the manual gain through the tiered range remap.
    ///
    /// Bits 4..=5 pick the range tier and bits 0..=3 are kept as the fine
    /// step; higher bits are ignored. The input is cached unchanged.
    pub fn set_gain(&mut self, gain: u8) -> Result<(), Error<B::Error>> {
        self.write(reg::GAIN, encoding::gain_register(gain))?;
        self.params.gain = gain;
        Ok(())
    }

    // ── Tone and color ─────────────────────────────────────────────────

    /// Set brightness.
    pub fn set_brightness(&mut self, value: u8) -> Result<(), Error<B::Error>> {
        self.write(reg::BRIGHT, value)?;
        self.params.brightness = value;
        Ok(())
    }

    /// Set contrast.
    pub fn set_contrast(&mut self, value: u8) -> Result<(), Error<B::Error>> {
        self.write(reg::CNST, value)?;
        self.params.contrast = value;
        Ok(())
    }

    /// Set saturation; the same byte goes to both U and V.
    pub fn set_saturation(&mut self, value: u8) -> Result<(), Error<B::Error>> {
        self.write(reg::USAT, value)?;
        self.write(reg::VSAT, value)?;
        self.params.saturation = value;
        Ok(())
    }

    /// Set sharpness; the same byte goes to the full- and reduced-resolution
    /// de-noise thresholds.
    pub fn set_sharpness(&mut self, value: u8) -> Result<(), Error<B::Error>> {
        self.write(reg::ADNSTH, value)?;
        self.write(reg::DNSTH, value)?;
        self.params.sharpness = value;
        Ok(())
    }

    /// Set hue (0..=180, clamped; 90 is neutral).
    ///
    /// The SIGN bit is updated first by read-modify-write, then HUECOS and
    /// HUESIN. The byte values depend on the configured [`HueEncoding`].
    pub fn set_hue(&mut self, hue: u8) -> Result<(), Error<B::Error>> {
        let hue = self.clamp_u8("hue", hue, HUE_MAX);
        let regs = encoding::hue_registers(hue, self.hue_encoding);
        self.set_bits(reg::SIGN, reg::SIGN_HUESIN_NEG, regs.sin_negative)?;
        self.write(reg::HUECOS, regs.cos)?;
        self.write(reg::HUESIN, regs.sin)?;
        self.params.hue = hue;
        Ok(())
    }

    /// Set the AWB red channel gain.
    pub fn set_red_balance(&mut self, value: u8) -> Result<(), Error<B::Error>> {
        self.write(reg::RED, value)?;
        self.params.red_balance = value;
        Ok(())
    }

    /// Set the AWB green channel gain.
    pub fn set_green_balance(&mut self, value: u8) -> Result<(), Error<B::Error>> {
        self.write(reg::GREEN, value)?;
        self.params.green_balance = value;
        Ok(())
    }

    /// Set the AWB blue channel gain.
    pub fn set_blue_balance(&mut self, value: u8) -> Result<(), Error<B::Error>> {
        self.write(reg::BLUE, value)?;
        self.params.blue_balance = value;
        Ok(())
    }

    // ── Orientation and test pattern ───────────────────────────────────

    /// Set horizontal mirror and vertical flip.
    ///
    /// COM3 carries these inverted: a cleared bit means flipped.
    pub fn set_flip(&mut self, horizontal: bool, vertical: bool) -> Result<(), Error<B::Error>> {
        let mut bits = 0;
        if !horizontal {
            bits |= reg::COM3_HMIRROR_OFF;
        }
        if !vertical {
            bits |= reg::COM3_VFLIP_OFF;
        }
        self.modify(reg::COM3, bits, reg::COM3_ORIENTATION_MASK)?;
        self.params.flip_h = horizontal;
        self.params.flip_v = vertical;
        Ok(())
    }

    /// Enable or disable the color bar test pattern.
    pub fn set_test_pattern(&mut self, enable: bool) -> Result<(), Error<B::Error>> {
        self.set_bits(reg::COM3, reg::COM3_COLOR_BAR, enable)?;
        self.params.test_pattern = enable;
        Ok(())
    }

    // ── Stream format ──────────────────────────────────────────────────

    /// Request a frame rate. Applied at the next stream start.
    ///
    /// Returns `false` without touching state while streaming. Otherwise the
    /// rate is snapped to the resolution's table and `true` is returned.
    pub fn set_framerate(&mut self, fps: u16) -> bool {
        if self.params.streaming {
            log::warn!("can't change framerate while streaming");
            return false;
        }
        self.params.framerate = encoding::normalize_framerate(self.params.resolution, fps);
        if self.params.framerate != fps {
            self.diagnostics.clamped("framerate", fps as u32, self.params.framerate as u32);
        }
        true
    }

    /// Select the output resolution. Same streaming rule as
    /// [`set_framerate()`](Self::set_framerate); the cached frame rate is
    /// re-snapped to the new resolution's table.
    pub fn set_resolution(&mut self, resolution: Resolution) -> bool {
        if self.params.streaming {
            log::warn!("can't change resolution while streaming");
            return false;
        }
        self.params.resolution = resolution;
        self.params.framerate = encoding::normalize_framerate(resolution, self.params.framerate);
        true
    }

    /// Record that the transport has started streaming.
    pub fn start_streaming(&mut self) {
        self.params.streaming = true;
    }

    /// Record that the transport has stopped streaming.
    pub fn stop_streaming(&mut self) {
        self.params.streaming = false;
    }

    /// Push every cached parameter to the sensor, in bring-up order.
    pub fn apply_all(&mut self) -> Result<(), Error<B::Error>> {
        let p = self.params;
        self.set_auto_gain(p.auto_gain)?;
        self.set_awb(p.awb)?;
        self.set_aec(p.aec)?;
        self.set_gain(p.gain)?;
        self.set_hue(p.hue)?;
        self.set_exposure(p.exposure)?;
        self.set_brightness(p.brightness)?;
        self.set_contrast(p.contrast)?;
        self.set_saturation(p.saturation)?;
        self.set_sharpness(p.sharpness)?;
        self.set_red_balance(p.red_balance)?;
        self.set_blue_balance(p.blue_balance)?;
        self.set_green_balance(p.green_balance)?;
        self.set_flip(p.flip_h, p.flip_v)?;
        self.set_test_pattern(p.test_pattern)
    }

    fn clamp_u8(&self, parameter: &str, value: u8, max: u8) -> u8 {
        if value > max {
            self.diagnostics.clamped(parameter, value as u32, max as u32);
            max
        } else {
            value
        }
    }

    fn clamp_u16(&self, parameter: &str, value: u16, max: u16) -> u16 {
        if value > max {
            self.diagnostics.clamped(parameter, value as u32, max as u32);
            max
        } else {
            value
        }
    }
}

// ── Getters ────────────────────────────────────────────────────────────────

impl<B> Ov7725<B> {
    /// All cached parameters.
    pub fn parameters(&self) -> &Parameters {
        &self.params
    }

    /// Frame dimensions `(width, height)` for the current resolution.
    pub fn size(&self) -> (u32, u32) {
        self.params.resolution.size()
    }

    /// Whether AGC is enabled.
    pub fn auto_gain(&self) -> bool {
        self.params.auto_gain
    }

    /// Whether automatic white balance is enabled.
    pub fn awb(&self) -> bool {
        self.params.awb
    }

    /// Whether automatic exposure control is enabled.
    pub fn aec(&self) -> bool {
        self.params.aec
    }

    /// Manual exposure, after clamping.
    pub fn exposure(&self) -> u16 {
        self.params.exposure
    }

    /// Manual gain as last requested (before the tier remap).
    pub fn gain(&self) -> u8 {
        self.params.gain
    }

    /// Brightness byte.
    pub fn brightness(&self) -> u8 {
        self.params.brightness
    }

    /// Contrast byte.
    pub fn contrast(&self) -> u8 {
        self.params.contrast
    }

    /// Saturation byte shared by U and V.
    pub fn saturation(&self) -> u8 {
        self.params.saturation
    }

    /// De-noise threshold byte.
    pub fn sharpness(&self) -> u8 {
        self.params.sharpness
    }

    /// Logical hue, 0..=180.
    pub fn hue(&self) -> u8 {
        self.params.hue
    }

    /// AWB red gain.
    pub fn red_balance(&self) -> u8 {
        self.params.red_balance
    }

    /// AWB green gain.
    pub fn green_balance(&self) -> u8 {
        self.params.green_balance
    }

    /// AWB blue gain.
    pub fn blue_balance(&self) -> u8 {
        self.params.blue_balance
    }

    /// Whether the image is mirrored horizontally.
    pub fn flip_h(&self) -> bool {
        self.params.flip_h
    }

    /// Whether the image is flipped vertically.
    pub fn flip_v(&self) -> bool {
        self.params.flip_v
    }

    /// Whether the color bar pattern replaces the image.
    pub fn test_pattern(&self) -> bool {
        self.params.test_pattern
    }

    /// Current output resolution.
    pub fn resolution(&self) -> Resolution {
        self.params.resolution
    }

    /// Frame rate, always a member of the resolution's table.
    pub fn framerate(&self) -> u16 {
        self.params.framerate
    }

    /// Whether the transport reported an active stream.
    pub fn is_streaming(&self) -> bool {
        self.params.streaming
    }

    /// Encoding used by [`set_hue()`](Ov7725::set_hue).
    pub fn hue_encoding(&self) -> HueEncoding {
        self.hue_encoding
    }

    /// Tracing settings of this session.
    pub fn diagnostics(&self) -> Diagnostics {
        self.diagnostics
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::mock::{MockBus, MockError};
    use alloc::vec;

    fn make_eye(bus: MockBus) -> Ov7725<MockBus> {
        Ov7725::new(bus, Diagnostics::quiet())
    }

    /// Run `op` against every prior value of `register` and check that only
    /// `mask` bits can change.
    fn assert_preserves_outside_mask(
        register: u8,
        mask: u8,
        op: impl Fn(&mut Ov7725<MockBus>) -> Result<(), Error<MockError>>,
    ) {
        for prior in 0..=u8::MAX {
            let mut bus = MockBus::new();
            bus.regs[register as usize] = prior;
            let mut eye = make_eye(bus);
            op(&mut eye).unwrap();
            let after = eye.release().reg(register);
            assert_eq!(
                after & !mask,
                prior & !mask,
                "register 0x{register:02X}, prior 0x{prior:02X}"
            );
        }
    }

    // ── Bit preservation ──────────────────────────────────────────────

    #[test]
    fn auto_gain_preserves_unowned_bits() {
        for on in [true, false] {
            assert_preserves_outside_mask(reg::COM8, reg::COM8_AGC, |e| e.set_auto_gain(on));
            assert_preserves_outside_mask(reg::DSP_CTRL1, reg::DSP_CTRL1_GAMMA, |e| {
                e.set_auto_gain(on)
            });
        }
    }

    #[test]
    fn awb_preserves_unowned_bits() {
        for on in [true, false] {
            assert_preserves_outside_mask(reg::COM8, reg::COM8_AWB, |e| e.set_awb(on));
            assert_preserves_outside_mask(reg::AWB_CTRL0, reg::AWB_CTRL0_CALC, |e| e.set_awb(on));
        }
    }

    #[test]
    fn aec_preserves_unowned_bits() {
        for on in [true, false] {
            assert_preserves_outside_mask(reg::COM8, reg::COM8_AEC, |e| e.set_aec(on));
        }
    }

    #[test]
    fn flip_and_test_pattern_preserve_unowned_bits() {
        for h in [true, false] {
            for v in [true, false] {
                assert_preserves_outside_mask(reg::COM3, reg::COM3_ORIENTATION_MASK, |e| {
                    e.set_flip(h, v)
                });
            }
        }
        for on in [true, false] {
            assert_preserves_outside_mask(reg::COM3, reg::COM3_COLOR_BAR, |e| {
                e.set_test_pattern(on)
            });
        }
    }

    #[test]
    fn hue_sign_preserves_unowned_bits() {
        for hue in [0u8, 60, 90, 143, 180] {
            assert_preserves_outside_mask(reg::SIGN, reg::SIGN_HUESIN_NEG, |e| e.set_hue(hue));
        }
    }

    // ── Automatic controls ────────────────────────────────────────────

    #[test]
    fn auto_gain_sets_both_registers() {
        let mut eye = make_eye(MockBus::new());
        eye.set_auto_gain(true).unwrap();
        assert!(eye.auto_gain());
        let bus = eye.release();
        assert_eq!(bus.reg(reg::COM8), 0x04);
        assert_eq!(bus.reg(reg::DSP_CTRL1), 0x03);

        let mut eye = make_eye(MockBus::with_fill(0xFF));
        eye.set_auto_gain(false).unwrap();
        let bus = eye.release();
        assert_eq!(bus.reg(reg::COM8), 0xFB);
        assert_eq!(bus.reg(reg::DSP_CTRL1), 0xFC);
    }

    #[test]
    fn awb_sets_both_registers() {
        let mut eye = make_eye(MockBus::new());
        eye.set_awb(true).unwrap();
        assert!(eye.awb());
        let bus = eye.release();
        assert_eq!(bus.reg(reg::COM8), 0x02);
        assert_eq!(bus.reg(reg::AWB_CTRL0), 0x40);
    }

    #[test]
    fn automatic_controls_share_com8() {
        let mut eye = make_eye(MockBus::new());
        eye.set_auto_gain(true).unwrap();
        eye.set_awb(true).unwrap();
        eye.set_aec(true).unwrap();
        assert_eq!(eye.release().reg(reg::COM8), 0x07);
    }

    // ── Exposure and gain ─────────────────────────────────────────────

    #[test]
    fn exposure_writes_high_then_low() {
        let mut eye = make_eye(MockBus::new());
        eye.set_exposure(0x1234).unwrap();
        assert_eq!(eye.exposure(), 0x1234);
        let bus = eye.release();
        assert_eq!(bus.writes, vec![(reg::AECH, 0x24), (reg::AEC, 0x68)]);
    }

    #[test]
    fn exposure_split_for_many_values() {
        for e in (0..=EXPOSURE_MAX).step_by(97) {
            let mut eye = make_eye(MockBus::new());
            eye.set_exposure(e).unwrap();
            let bus = eye.release();
            assert_eq!(bus.reg(reg::AECH), (e >> 7) as u8);
            assert_eq!(bus.reg(reg::AEC), ((e << 1) & 0xFF) as u8);
        }
    }

    #[test]
    fn exposure_above_max_is_clamped() {
        let mut eye = make_eye(MockBus::new());
        eye.set_exposure(u16::MAX).unwrap();
        assert_eq!(eye.exposure(), EXPOSURE_MAX);
        assert_eq!(eye.release().reg(reg::AECH), 0xFF);
    }

    #[test]
    fn gain_writes_remapped_byte() {
        let cases: [(u8, u8); 8] = [
            (0x00, 0x00),
            (0x0F, 0x0F),
            (0x10, 0x30),
            (0x1F, 0x3F),
            (0x20, 0x70),
            (0x2F, 0x7F),
            (0x30, 0xF0),
            (0x3F, 0xFF),
        ];
        for (input, expected) in cases {
            let mut eye = make_eye(MockBus::new());
            eye.set_gain(input).unwrap();
            assert_eq!(eye.gain(), input);
            assert_eq!(eye.release().writes, vec![(reg::GAIN, expected)]);
        }
    }

    #[test]
    fn gain_high_bits_follow_the_tier_table() {
        let cases: [(u8, u8); 6] = [
            (0x40, 0x00),
            (0x55, 0x35),
            (0x80, 0x00),
            (0xAA, 0x7A),
            (0xC3, 0x03),
            (0xFF, 0xFF),
        ];
        for (input, expected) in cases {
            let mut eye = make_eye(MockBus::new());
            eye.set_gain(input).unwrap();
            assert_eq!(eye.gain(), input);
            assert_eq!(eye.release().writes, vec![(reg::GAIN, expected)]);
        }
    }

    #[test]
    fn gain_matches_tier_table_for_every_byte() {
        for input in 0..=u8::MAX {
            let mut eye = make_eye(MockBus::new());
            eye.set_gain(input).unwrap();
            let tier = encoding::GAIN_TIERS[((input & 0x30) >> 4) as usize];
            assert_eq!(eye.release().reg(reg::GAIN), (input & 0x0F) | tier.range_bits);
        }
    }

    // ── Direct writes ─────────────────────────────────────────────────

    #[test]
    fn saturation_and_sharpness_write_two_registers() {
        let mut eye = make_eye(MockBus::new());
        eye.set_saturation(0x55).unwrap();
        eye.set_sharpness(0x22).unwrap();
        let bus = eye.release();
        assert_eq!(
            bus.writes,
            vec![
                (reg::USAT, 0x55),
                (reg::VSAT, 0x55),
                (reg::ADNSTH, 0x22),
                (reg::DNSTH, 0x22),
            ]
        );
    }

    #[test]
    fn single_register_writes() {
        let mut eye = make_eye(MockBus::new());
        eye.set_brightness(1).unwrap();
        eye.set_contrast(2).unwrap();
        eye.set_red_balance(3).unwrap();
        eye.set_green_balance(4).unwrap();
        eye.set_blue_balance(5).unwrap();
        assert_eq!(
            (eye.brightness(), eye.contrast(), eye.red_balance(), eye.green_balance(), eye.blue_balance()),
            (1, 2, 3, 4, 5)
        );
        let bus = eye.release();
        assert_eq!(
            bus.writes,
            vec![(reg::BRIGHT, 1), (reg::CNST, 2), (reg::RED, 3), (reg::GREEN, 4), (reg::BLUE, 5)]
        );
        assert_eq!(bus.reads, 0);
    }

    // ── Hue ───────────────────────────────────────────────────────────

    #[test]
    fn hue_literal_writes_firmware_bytes() {
        let mut eye = make_eye(MockBus::with_fill(0xFF));
        eye.set_hue(143).unwrap();
        assert_eq!(eye.hue(), 143);
        let bus = eye.release();
        assert_eq!(bus.written_registers(), vec![reg::SIGN, reg::HUECOS, reg::HUESIN]);
        assert_eq!(bus.reg(reg::SIGN), 0xFD);
        assert_eq!(bus.reg(reg::HUECOS), 139);
        assert_eq!(bus.reg(reg::HUESIN), 50);
    }

    #[test]
    fn hue_degrees_sets_sign_for_negative_offsets() {
        let config = SensorConfig { hue_encoding: HueEncoding::Degrees, ..SensorConfig::default() };
        let mut eye = Ov7725::with_config(MockBus::new(), config);
        eye.set_hue(60).unwrap();
        let bus = eye.release();
        assert_eq!(bus.reg(reg::SIGN), reg::SIGN_HUESIN_NEG);
        assert_eq!(bus.reg(reg::HUESIN), 64);
        assert_eq!(bus.reg(reg::HUECOS), 111);
    }

    #[test]
    fn hue_above_max_is_clamped() {
        let mut eye = make_eye(MockBus::new());
        eye.set_hue(250).unwrap();
        assert_eq!(eye.hue(), HUE_MAX);
    }

    // ── Orientation ───────────────────────────────────────────────────

    #[test]
    fn flip_bits_are_inverted() {
        let mut eye = make_eye(MockBus::new());
        eye.set_flip(false, false).unwrap();
        assert_eq!(eye.release().reg(reg::COM3), 0xC0);

        let mut eye = make_eye(MockBus::new());
        eye.set_flip(true, false).unwrap();
        assert!(eye.flip_h() && !eye.flip_v());
        assert_eq!(eye.release().reg(reg::COM3), 0x80);

        let mut eye = make_eye(MockBus::new());
        eye.set_flip(false, true).unwrap();
        assert_eq!(eye.release().reg(reg::COM3), 0x40);

        let mut eye = make_eye(MockBus::with_fill(0xFF));
        eye.set_flip(true, true).unwrap();
        assert_eq!(eye.release().reg(reg::COM3), 0x3F);
    }

    #[test]
    fn test_pattern_toggles_bit_zero() {
        let mut eye = make_eye(MockBus::new());
        eye.set_test_pattern(true).unwrap();
        assert!(eye.test_pattern());
        eye.set_flip(false, false).unwrap();
        assert_eq!(eye.release().reg(reg::COM3), 0xC1);
    }

    // ── Frame rate and resolution ─────────────────────────────────────

    #[test]
    fn framerate_normalized_when_idle() {
        let mut eye = make_eye(MockBus::new());
        assert!(eye.set_framerate(45));
        assert_eq!(eye.framerate(), 40);
    }

    #[test]
    fn framerate_rejected_while_streaming() {
        let mut eye = make_eye(MockBus::new());
        eye.start_streaming();
        assert!(!eye.set_framerate(15));
        assert_eq!(eye.framerate(), 60);
        let bus = eye.release();
        assert!(bus.writes.is_empty());
        assert_eq!(bus.reads, 0);
    }

    #[test]
    fn framerate_accepted_after_stop() {
        let mut eye = make_eye(MockBus::new());
        eye.start_streaming();
        eye.stop_streaming();
        assert!(eye.set_framerate(15));
        assert_eq!(eye.framerate(), 15);
    }

    #[test]
    fn resolution_switch_resnaps_framerate() {
        let mut eye = make_eye(MockBus::new());
        assert!(eye.set_framerate(83));
        assert!(eye.set_resolution(Resolution::Qvga));
        assert_eq!(eye.size(), (320, 240));
        assert_eq!(eye.framerate(), 75);

        assert!(eye.set_framerate(187));
        assert!(eye.set_resolution(Resolution::Vga));
        assert_eq!(eye.framerate(), 83);
        assert_eq!(eye.size(), (640, 480));
    }

    #[test]
    fn resolution_rejected_while_streaming() {
        let mut eye = make_eye(MockBus::new());
        eye.start_streaming();
        assert!(!eye.set_resolution(Resolution::Qvga));
        assert_eq!(eye.resolution(), Resolution::Vga);
    }

    #[test]
    fn config_framerate_is_normalized() {
        let config = SensorConfig {
            resolution: Resolution::Qvga,
            framerate: 100,
            ..SensorConfig::default()
        };
        let eye = Ov7725::with_config(MockBus::new(), config);
        assert_eq!(eye.framerate(), 100);
        assert_eq!(eye.size(), (320, 240));

        let config = SensorConfig { framerate: 61, ..SensorConfig::default() };
        let eye = Ov7725::with_config(MockBus::new(), config);
        assert_eq!(eye.framerate(), 60);
    }

    // ── Bus errors ────────────────────────────────────────────────────

    #[test]
    fn write_failure_is_reported_and_cache_kept() {
        let mut bus = MockBus::new();
        bus.fail_write = Some(reg::GAIN);
        let mut eye = make_eye(bus);
        assert_eq!(eye.set_gain(5), Err(Error::Bus(MockError)));
        assert_eq!(eye.gain(), Parameters::default().gain);
    }

    #[test]
    fn read_failure_aborts_modify() {
        let mut bus = MockBus::new();
        bus.fail_read = Some(reg::COM3);
        let mut eye = make_eye(bus);
        assert_eq!(eye.set_flip(true, true), Err(Error::Bus(MockError)));
        assert!(!eye.flip_h());
        assert!(eye.release().writes.is_empty());
    }

    #[test]
    fn second_register_failure_keeps_cache() {
        let mut bus = MockBus::new();
        bus.fail_write = Some(reg::DSP_CTRL1);
        let mut eye = make_eye(bus);
        assert!(eye.set_auto_gain(true).is_err());
        assert!(!eye.auto_gain());
        // The first register was already written; bus-level atomicity is not provided.
        assert_eq!(eye.release().reg(reg::COM8), reg::COM8_AGC);
    }

    #[test]
    fn exposure_low_write_failure_keeps_cache() {
        let mut bus = MockBus::new();
        bus.fail_write = Some(reg::AEC);
        let mut eye = make_eye(bus);
        assert!(eye.set_exposure(500).is_err());
        assert_eq!(eye.exposure(), 120);
    }

    // ── Bring-up ──────────────────────────────────────────────────────

    #[test]
    fn apply_all_pushes_defaults() {
        let mut eye = make_eye(MockBus::with_fill(0xFF));
        eye.apply_all().unwrap();
        let bus = eye.release();
        assert_eq!(bus.reg(reg::COM8), 0xF8);
        assert_eq!(bus.reg(reg::GAIN), encoding::gain_register(20));
        assert_eq!(bus.reg(reg::AECH), 0x00);
        assert_eq!(bus.reg(reg::AEC), 0xF0);
        assert_eq!(bus.reg(reg::BRIGHT), 20);
        assert_eq!(bus.reg(reg::CNST), 37);
        assert_eq!(bus.reg(reg::USAT), 40);
        assert_eq!(bus.reg(reg::VSAT), 40);
        assert_eq!(bus.reg(reg::ADNSTH), 0);
        assert_eq!(bus.reg(reg::RED), 128);
        assert_eq!(bus.reg(reg::GREEN), 128);
        assert_eq!(bus.reg(reg::BLUE), 128);
        assert_eq!(bus.reg(reg::HUECOS), 139);
        assert_eq!(bus.reg(reg::COM3), 0xFE);
    }

    #[test]
    fn apply_all_keeps_cache() {
        let mut eye = make_eye(MockBus::new());
        let before = *eye.parameters();
        eye.apply_all().unwrap();
        assert_eq!(*eye.parameters(), before);
    }

    #[test]
    fn controller_works_through_borrowed_bus() {
        let mut bus = MockBus::new();
        {
            let mut eye = Ov7725::new(&mut bus, Diagnostics::verbose());
            eye.set_brightness(9).unwrap();
            assert!(eye.diagnostics().traces_registers());
        }
        assert_eq!(bus.reg(reg::BRIGHT), 9);
    }
}
