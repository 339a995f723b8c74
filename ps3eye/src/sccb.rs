//! SCCB register access over an `embedded-hal` I2C bus.
//!
//! SCCB is I2C-compatible for single-byte register access but does not
//! support repeated start, so a register read is issued as a one-byte
//! address write followed by a separate one-byte read.
//!
//! # Feature gate
//!
//! This module is available when the `sccb` feature is enabled (on by default).

use embedded_hal::i2c::I2c;

use crate::bus::RegisterBus;
use crate::sensor::registers::SCCB_ADDR;

/// [`RegisterBus`] implementation over any [`embedded_hal::i2c::I2c`].
pub struct SccbBus<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> SccbBus<I2C>
where
    I2C: I2c,
{
    /// Default 7-bit OV7725 address.
    pub const DEFAULT_ADDRESS: u8 = SCCB_ADDR;

    /// Create a bus for the sensor at the default address (0x21).
    pub fn new(i2c: I2C) -> Self {
        Self { i2c, address: Self::DEFAULT_ADDRESS }
    }

    /// Create a bus for a sensor at a specific 7-bit address.
    pub fn new_with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Release the I2C peripheral.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> RegisterBus for SccbBus<I2C>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    fn read(&mut self, register: u8) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.i2c.write(self.address, &[register])?;
        self.i2c.read(self.address, &mut buf)?;
        Ok(buf[0])
    }

    fn write(&mut self, register: u8, value: u8) -> Result<(), Self::Error> {
        self.i2c.write(self.address, &[register, value])
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
