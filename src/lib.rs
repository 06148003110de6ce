//! # sound-capture
//!
//! Real-time single-sound capture with amplitude-threshold event detection.
//!
//! `sound-capture` watches a live two-channel sample stream - channel 0 is
//! the X (reference) signal, channel 1 the Y (signal) channel - detects the
//! onset and end of a sound event by thresholding the mean absolute
//! amplitude per block, buffers the event's samples for both channels, and
//! delivers the finished event to an asynchronous consumer once silence
//! resumes. Audio passes through unaltered; capture is a side effect.
//!
//! ## Quick Start
//!
//! ```
//! use sound_capture::{Notification, SoundCapture};
//!
//! let (mut processor, mut handle) = SoundCapture::builder()
//!     .threshold(0.001)
//!     .silence_tolerance(2)
//!     .block_size(4)
//!     .build()?;
//!
//! // The host calls `process` once per tick. One loud block, then enough
//! // silence to close the event:
//! let loud = [0.5_f32, -0.5, 0.5, -0.5];
//! let quiet = [0.0_f32; 4];
//! let mut out_x = [0.0_f32; 4];
//! let mut out_y = [0.0_f32; 4];
//!
//! processor.process(&[&loud, &loud], &mut [&mut out_x[..], &mut out_y[..]]);
//! for _ in 0..3 {
//!     processor.process(&[&quiet, &quiet], &mut [&mut out_x[..], &mut out_y[..]]);
//! }
//!
//! match handle.try_recv() {
//!     Some(Notification::SoundData(event)) => assert_eq!(event.len(), 16),
//!     other => panic!("expected a capture event, got {other:?}"),
//! }
//! # Ok::<(), sound_capture::CaptureError>(())
//! ```
//!
//! ## Architecture
//!
//! The crate maintains a strict boundary between the real-time tick and the
//! control context:
//!
//! - **Host tick**: [`BlockProcessor::process`] runs on the audio callback,
//!   never blocks, never does I/O, and grows buffers only against
//!   pre-reserved capacity
//! - **Control channel**: one non-blocking channel per direction; stop
//!   commands apply at the start of the next tick, notifications are posted
//!   fire-and-forget
//! - **Controller**: [`CaptureHandle`] receives captured events and errors
//!   asynchronously and owns the stop command
//!
//! The stop lifecycle is one-shot: once a processor honors a stop or hits a
//! fatal input error it stays inert and a new pipeline must be built.

// Audio code requires intentional numeric casts between sample widths
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
#![warn(missing_docs)]

mod block;
mod builder;
mod channel;
mod config;
mod detector;
mod error;
mod event;
pub mod host;
mod pipeline;
mod session;

pub use block::BlockInput;
pub use builder::{SoundCapture, SoundCaptureBuilder};
pub use channel::{Command, Notification};
pub use config::{
    CaptureConfig, DEFAULT_EVENT_CAPACITY, DEFAULT_SILENCE_TOLERANCE, DEFAULT_THRESHOLD,
};
pub use detector::BlockMetrics;
pub use error::CaptureError;
pub use event::CaptureEvent;
pub use pipeline::{BlockProcessor, CaptureState};
pub use session::{CaptureHandle, CaptureStats};
