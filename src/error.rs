//! Error types for sound-capture.
//!
//! Errors are split into two categories:
//! - **Fatal errors** ([`CaptureError`]): Returned as `Result` from builder
//!   validation and controller operations.
//! - **Runtime conditions**: Surfaced through
//!   [`Notification`](crate::Notification) or logged on the tick that
//!   detects them. Nothing is raised across the real-time boundary.

/// Fatal errors returned from builder validation and controller operations.
///
/// Runtime conditions (a missing signal channel, an empty input tick) are
/// not represented here - they travel through the control channel as
/// notifications or are logged, and the continue-signal returned from
/// [`BlockProcessor::process`](crate::BlockProcessor::process) tells the
/// host when to tear the processor down.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// The activity threshold must be a finite value greater than zero.
    #[error("invalid threshold {value}: must be finite and greater than zero")]
    InvalidThreshold {
        /// The rejected threshold value.
        value: f32,
    },

    /// The block size must be non-zero.
    #[error("block size must be non-zero")]
    ZeroBlockSize,

    /// The processor side of the control channel is gone.
    ///
    /// The processor was dropped; a fresh pipeline must be built to resume.
    #[error("processor detached: control channel closed")]
    ProcessorDetached,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_threshold_display() {
        let err = CaptureError::InvalidThreshold { value: -1.0 };
        assert_eq!(
            err.to_string(),
            "invalid threshold -1: must be finite and greater than zero"
        );
    }

    #[test]
    fn test_zero_block_size_display() {
        assert_eq!(
            CaptureError::ZeroBlockSize.to_string(),
            "block size must be non-zero"
        );
    }

    #[test]
    fn test_detached_display() {
        assert_eq!(
            CaptureError::ProcessorDetached.to_string(),
            "processor detached: control channel closed"
        );
    }
}
