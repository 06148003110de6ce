//! The capture processing core.
//!
//! One tick flows through the pipeline like this:
//!
//! ```text
//! host tick → BlockProcessor → BlockMetrics → CaptureMachine → CaptureSession
//!                  ↑ commands                    (on close) notifications ↓
//!                  └────────────── control channel ──────────────────────┘
//! ```
//!
//! - **`BlockProcessor`**: real-time entry point; bypass copy, validation,
//!   command application, notification posting
//! - **`CaptureMachine`**: idle/capturing lifecycle driven by the detector
//! - **`CaptureSession`**: paired X/Y accumulation buffers
//!
//! Everything here runs on the host's audio callback and never blocks.

mod buffer;
mod processor;
mod state;

pub use processor::BlockProcessor;
pub use state::CaptureState;
