//! Builder for wiring a capture processor and its controller handle.

use std::sync::Arc;

use crate::channel::control_channel;
use crate::pipeline::BlockProcessor;
use crate::session::{CaptureHandle, SharedState};
use crate::{CaptureConfig, CaptureError};

/// Entry point for constructing a capture pipeline.
///
/// # Example
///
/// ```
/// use sound_capture::SoundCapture;
///
/// let (processor, handle) = SoundCapture::builder()
///     .threshold(0.001)
///     .silence_tolerance(2)
///     .block_size(128)
///     .build()?;
/// // `processor` goes to the real-time host; `handle` stays with the
/// // controller.
/// # Ok::<(), sound_capture::CaptureError>(())
/// ```
pub struct SoundCapture;

impl SoundCapture {
    /// Creates a builder with default configuration.
    #[must_use]
    pub fn builder() -> SoundCaptureBuilder {
        SoundCaptureBuilder::default()
    }
}

/// Fluent configuration for a capture pipeline.
///
/// All settings have sensible defaults; see [`CaptureConfig`] for each field's
/// meaning and default value.
#[derive(Debug, Clone, Default)]
pub struct SoundCaptureBuilder {
    config: CaptureConfig,
}

impl SoundCaptureBuilder {
    /// Sets the activity threshold on the mean absolute amplitude.
    #[must_use]
    pub fn threshold(mut self, threshold: f32) -> Self {
        self.config.threshold = threshold;
        self
    }

    /// Sets the number of consecutive silent blocks tolerated before an
    /// active session closes.
    #[must_use]
    pub fn silence_tolerance(mut self, blocks: u32) -> Self {
        self.config.silence_tolerance = blocks;
        self
    }

    /// Sets the samples-per-channel block size the host delivers per tick.
    #[must_use]
    pub fn block_size(mut self, samples: usize) -> Self {
        self.config.block_size = samples;
        self
    }

    /// Sets the channel count the host delivers.
    #[must_use]
    pub fn channels(mut self, channels: u16) -> Self {
        self.config.channels = channels;
        self
    }

    /// Sets the per-channel capacity reserved when a session opens.
    #[must_use]
    pub fn event_capacity(mut self, samples: usize) -> Self {
        self.config.event_capacity = samples;
        self
    }

    /// Replaces the whole configuration at once.
    #[must_use]
    pub fn config(mut self, config: CaptureConfig) -> Self {
        self.config = config;
        self
    }

    /// Validates the configuration and wires the pipeline.
    ///
    /// Returns the real-time processor and its controller handle, connected
    /// by one control channel per direction and sharing the session
    /// counters.
    ///
    /// # Errors
    ///
    /// Returns a [`CaptureError`] if the configuration is invalid.
    pub fn build(self) -> Result<(BlockProcessor, CaptureHandle), CaptureError> {
        self.config.validate()?;

        let (controller_link, processor_link) = control_channel();
        let shared = Arc::new(SharedState::new());

        let processor = BlockProcessor::new(&self.config, processor_link, Arc::clone(&shared));
        let handle = CaptureHandle::new(controller_link, shared);

        Ok((processor, handle))
    }
}
