//! Error type for sensor control.

use core::fmt;

/// Errors returned by [`Ov7725`](super::Ov7725) setters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// A register read or write failed on the underlying bus. The cached
    /// parameter is left at its previous value.
    Bus(E),
}

// Allow ergonomic `?` propagation from raw bus errors.
impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Error::Bus(error)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Bus(e) => write!(f, "register bus error: {:?}", e),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for Error<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::Bus(e) => defmt::write!(f, "register bus error: {}", e),
        }
    }
}
