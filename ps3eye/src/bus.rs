//! Register bus abstraction.
//!
//! The OV7725 exposes 8-bit registers in an 8-bit address space. Whatever
//! carries the transactions (the SCCB pins directly, or the bridge chip's
//! vendor requests over USB) implements [`RegisterBus`]; the sensor
//! controller only ever talks to this trait.

/// Byte-wide register access over the sensor's two-wire control bus.
pub trait RegisterBus {
    /// Transport error type.
    type Error;

    /// Read the register at `register`.
    fn read(&mut self, register: u8) -> Result<u8, Self::Error>;

    /// Write `value` to the register at `register`.
    fn write(&mut self, register: u8, value: u8) -> Result<(), Self::Error>;
}

impl<B: RegisterBus + ?Sized> RegisterBus for &mut B {
    type Error = B::Error;

    fn read(&mut self, register: u8) -> Result<u8, Self::Error> {
        B::read(self, register)
    }

    fn write(&mut self, register: u8, value: u8) -> Result<(), Self::Error> {
        B::write(self, register, value)
    }
}
