//! Register-file bus used by the sensor tests.

use alloc::vec::Vec;

use crate::bus::RegisterBus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MockError;

/// Bus backed by a 256-byte register file that records every write.
pub(crate) struct MockBus {
    pub regs: [u8; 256],
    /// Write log in chronological order.
    pub writes: Vec<(u8, u8)>,
    pub reads: usize,
    /// Register whose reads fail.
    pub fail_read: Option<u8>,
    /// Register whose writes fail.
    pub fail_write: Option<u8>,
}

impl MockBus {
    pub fn new() -> Self {
        Self {
            regs: [0; 256],
            writes: Vec::new(),
            reads: 0,
            fail_read: None,
            fail_write: None,
        }
    }

    pub fn with_fill(value: u8) -> Self {
        let mut bus = Self::new();
        bus.regs = [value; 256];
        bus
    }

    pub fn reg(&self, register: u8) -> u8 {
        self.regs[register as usize]
    }

    /// Registers written, in order.
    pub fn written_registers(&self) -> Vec<u8> {
        self.writes.iter().map(|&(r, _)| r).collect()
    }
}

impl RegisterBus for MockBus {
    type Error = MockError;

    fn read(&mut self, register: u8) -> Result<u8, Self::Error> {
        if self.fail_read == Some(register) {
            return Err(MockError);
        }
        self.reads += 1;
        Ok(self.regs[register as usize])
    }

    fn write(&mut self, register: u8, value: u8) -> Result<(), Self::Error> {
        if self.fail_write == Some(register) {
            return Err(MockError);
        }
        self.regs[register as usize] = value;
        self.writes.push((register, value));
        Ok(())
    }
}
