//! OV7725 image sensor parameter control.
//!
//! [`Ov7725`] owns a [`RegisterBus`](crate::bus::RegisterBus) and the cached
//! [`Parameters`] of one camera session. Setters translate logical values
//! into read-modify-write transactions; getters read the cache.

pub mod encoding;
pub mod registers;
mod error;
mod ov7725;
mod params;

#[cfg(test)]
pub(crate) mod mock;

pub use encoding::{HueEncoding, HueRegisters};
pub use error::Error;
pub use ov7725::Ov7725;
pub use params::{Parameters, Resolution, SensorConfig};
