//! Configuration for the capture processor.

use crate::error::CaptureError;

/// Default activity threshold on the mean absolute amplitude.
pub const DEFAULT_THRESHOLD: f32 = 0.001;

/// Default number of consecutive silent blocks tolerated before an active
/// session closes.
pub const DEFAULT_SILENCE_TOLERANCE: u32 = 2;

/// Default per-channel capacity reserved when a session opens: ten seconds
/// at 48 kHz. Growth past this is amortized, not forbidden.
pub const DEFAULT_EVENT_CAPACITY: usize = 48_000 * 10;

/// Configuration for a capture pipeline.
///
/// Immutable after processor construction - supplied once at build time via
/// [`SoundCaptureBuilder`](crate::SoundCaptureBuilder).
///
/// # Example
///
/// ```
/// use sound_capture::CaptureConfig;
///
/// let config = CaptureConfig {
///     threshold: 0.005,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Mean absolute amplitude above which a block counts as active.
    ///
    /// Default: 0.001
    pub threshold: f32,

    /// Consecutive silent blocks tolerated before an active session closes.
    ///
    /// Silent blocks inside this window are padded into the capture.
    /// Default: 2
    pub silence_tolerance: u32,

    /// Samples per channel per tick, supplied by the host runtime.
    ///
    /// Default: 128
    pub block_size: usize,

    /// Number of channels the host delivers. Channel 0 is the X (reference)
    /// signal, channel 1 the Y (signal) channel.
    ///
    /// Default: 2
    pub channels: u16,

    /// Per-channel capacity reserved when a session opens, in samples.
    ///
    /// Sized to the expected maximum event duration so real-time buffer
    /// growth stays amortized. Default: [`DEFAULT_EVENT_CAPACITY`]
    pub event_capacity: usize,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            silence_tolerance: DEFAULT_SILENCE_TOLERANCE,
            block_size: 128,
            channels: 2,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl CaptureConfig {
    /// Checks that the configuration can drive a processor.
    pub(crate) fn validate(&self) -> Result<(), CaptureError> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(CaptureError::InvalidThreshold {
                value: self.threshold,
            });
        }
        if self.block_size == 0 {
            return Err(CaptureError::ZeroBlockSize);
        }
        Ok(())
    }
}
