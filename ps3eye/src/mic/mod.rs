//! Microphone-array history.
//!
//! ## Components
//!
//! | Item | Description |
//! |------|-------------|
//! | [`AudioFrame`] | One signed 16-bit sample per raw channel |
//! | [`AudioCallback`] | Seam the transport delivers frame batches through |
//! | [`AudioHistory`] | Fixed-capacity per-channel ring with optional sum channel |
//! | [`SharedHistory`] | Critical-section wrapper for producer/consumer sharing |
//!
//! The transport's delivery callback is the only producer. It calls
//! [`SharedHistory::push`]; display or analysis code on another thread takes
//! snapshots through the same wrapper.
//!
//! # Feature gate
//!
//! This module is available when the `mic` feature is enabled (on by default).

pub mod frame;
pub mod history;
pub mod shared;

pub use frame::{AudioCallback, AudioFrame, MicFrame};
pub use history::AudioHistory;
pub use shared::SharedHistory;
