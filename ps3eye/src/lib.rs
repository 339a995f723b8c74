//! # ps3eye
//!
//! A `no_std` control-plane for the PS3 Eye camera: parameter control for
//! the OV7725 image sensor and a rolling history for the four-capsule
//! microphone array on the same device.
//!
//! ## Architecture
//!
//! | Layer | Module | Purpose |
//! |-------|--------|---------|
//! | Bus | [`bus`] | `RegisterBus` trait for 8-bit register access |
//! | Transport | [`sccb`] | `RegisterBus` over `embedded-hal` I2C (feature-gated) |
//! | Sensor | [`sensor`] | OV7725 parameter controller and register encodings |
//! | Microphone | [`mic`] | Multi-channel ring history and shared wrapper (feature-gated) |
//! | Logging | [`diagnostics`] | Per-session register tracing via `log` |
//!
//! USB enumeration, isochronous transfers and image decoding live outside
//! this crate. They hand it a register bus and batches of audio frames.
//!
//! ## Quick start
//!
//! ```ignore
//! use ps3eye::sccb::SccbBus;
//! use ps3eye::sensor::{Ov7725, SensorConfig};
//!
//! let mut eye = Ov7725::with_config(SccbBus::new(i2c), SensorConfig::default());
//! eye.apply_all()?;
//! eye.set_gain(32)?;
//! eye.set_exposure(200)?;
//! let (width, height) = eye.size();
//! ```
//!
//! ```ignore
//! use ps3eye::mic::{AudioHistory, SharedHistory};
//! use ps3eye::constants::MIC_SAMPLE_RATE;
//!
//! let history = SharedHistory::new(AudioHistory::new(0.5, MIC_SAMPLE_RATE, true));
//!
//! // Audio delivery callback:
//! history.push(frames);
//!
//! // Display thread:
//! let n = history.snapshot(4, &mut scratch);
//! ```
//!
//! ## Features
//!
//! | Feature | Default | Enables |
//! |---------|---------|---------|
//! | `sccb` | yes | `SccbBus` adapter (requires `embedded-hal`) |
//! | `mic` | yes | Microphone history (requires `critical-section`) |
//! | `defmt` | no | `defmt::Format` for error types |

#![no_std]

extern crate alloc;

pub mod constants;
pub mod bus;
pub mod diagnostics;
pub mod sensor;

#[cfg(feature = "sccb")]
pub mod sccb;

#[cfg(feature = "mic")]
pub mod mic;
