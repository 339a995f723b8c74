//! Per-session diagnostics context.
//!
//! A [`Diagnostics`] value is handed to each component at construction and
//! decides whether register-level traces are emitted. Output goes through
//! the [`log`] facade, so the binary picks the logger.

/// Diagnostics toggles for one camera session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Diagnostics {
    trace_registers: bool,
}

impl Diagnostics {
    /// No register tracing. Warnings are still logged.
    pub const fn quiet() -> Self {
        Self { trace_registers: false }
    }

    /// Trace every register read and write at `debug` level.
    pub const fn verbose() -> Self {
        Self { trace_registers: true }
    }

    /// Whether register transactions are traced.
    pub fn traces_registers(&self) -> bool {
        self.trace_registers
    }

    pub(crate) fn register_read(&self, register: u8, value: u8) {
        if self.trace_registers {
            log::debug!("sccb read  0x{:02X} -> 0x{:02X}", register, value);
        }
    }

    pub(crate) fn register_write(&self, register: u8, value: u8) {
        if self.trace_registers {
            log::debug!("sccb write 0x{:02X} <- 0x{:02X}", register, value);
        }
    }

    pub(crate) fn clamped(&self, parameter: &str, requested: u32, applied: u32) {
        if self.trace_registers {
            log::debug!("{} {} out of range, clamped to {}", parameter, requested, applied);
        }
    }
}
