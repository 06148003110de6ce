//! The captured sound event delivered to consumers.

use std::time::Duration;

/// A finalized sound event: the paired X/Y sample sequences of one closed
/// capture session.
///
/// The two sequences are always equal length - they grow together block by
/// block while the session is open. Ownership transfers to the consumer on
/// emission; the processor keeps nothing.
///
/// Trailing silence inside the tolerance window is part of the event (the
/// session pads silent blocks in until it closes) and is never trimmed out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaptureEvent {
    /// Reference (X) channel samples, in arrival order.
    pub samples_x: Vec<f32>,

    /// Signal (Y) channel samples, in arrival order.
    pub samples_y: Vec<f32>,
}

impl CaptureEvent {
    pub(crate) fn new(samples_x: Vec<f32>, samples_y: Vec<f32>) -> Self {
        debug_assert_eq!(samples_x.len(), samples_y.len());
        Self {
            samples_x,
            samples_y,
        }
    }

    /// Returns the per-channel sample count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples_x.len()
    }

    /// Returns `true` if the event holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples_x.is_empty()
    }

    /// Returns the event duration at the given sample rate.
    #[must_use]
    pub fn duration(&self, sample_rate: u32) -> Duration {
        if sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.len() as f64 / f64::from(sample_rate))
    }
}
