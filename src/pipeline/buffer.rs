//! Accumulation buffers for one in-progress capture session.

use crate::CaptureEvent;

/// Owned sample storage for the sound event currently being captured.
///
/// The X and Y buffers grow together per appended block - never
/// independently - so the two sequences are equal length at all times.
/// Capacity is reserved when a session opens and survives `clear`, keeping
/// per-block growth amortized on the real-time thread.
///
/// At most one session exists at a time; the buffers are reused across
/// sessions instead of being reallocated.
#[derive(Debug, Default)]
pub(crate) struct CaptureSession {
    samples_x: Vec<f32>,
    samples_y: Vec<f32>,
    /// Consecutive silent blocks seen, reset by every active block.
    silent_blocks: u32,
}

impl CaptureSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves capacity ahead of a session's first block.
    pub fn open(&mut self, capacity: usize) {
        self.samples_x.reserve(capacity);
        self.samples_y.reserve(capacity);
    }

    /// Appends one block's worth of samples to both channels.
    pub fn append(&mut self, x: &[f32], y: &[f32]) {
        self.samples_x.extend_from_slice(x);
        self.samples_y.extend_from_slice(y);
    }

    /// Per-channel sample count accumulated so far.
    pub fn len(&self) -> usize {
        self.samples_x.len()
    }

    /// Records an active block: the silence run is broken.
    pub fn mark_active(&mut self) {
        self.silent_blocks = 0;
    }

    /// Records a silent block and returns the length of the current run.
    pub fn mark_silent(&mut self) -> u32 {
        self.silent_blocks = self.silent_blocks.saturating_add(1);
        self.silent_blocks
    }

    pub fn silent_blocks(&self) -> u32 {
        self.silent_blocks
    }

    /// Discards the accumulated samples, keeping capacity.
    pub fn clear(&mut self) {
        self.samples_x.clear();
        self.samples_y.clear();
        self.silent_blocks = 0;
    }

    /// Moves the accumulated samples out as a finished event.
    ///
    /// The buffers are left empty; the next session re-reserves capacity
    /// through [`open`](Self::open).
    pub fn take(&mut self) -> CaptureEvent {
        self.silent_blocks = 0;
        CaptureEvent::new(
            std::mem::take(&mut self.samples_x),
            std::mem::take(&mut self.samples_y),
        )
    }
}
