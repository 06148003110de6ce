//! Host-boundary glue: ring-buffer block assembly and a mock host.
//!
//! The crate itself never opens a device. A real host pushes raw samples
//! into the producer ends of two lock-free SPSC ring buffers from its
//! device callback; [`BlockAssembler`] pops complete fixed-size blocks on
//! the tick side. [`MockHost`] generates synthetic signals and drives a
//! processor directly, so the full pipeline is testable without hardware.

use ringbuf::traits::{Consumer, Observer, Split};
use ringbuf::{HeapCons, HeapProd, HeapRb};

use crate::pipeline::BlockProcessor;

/// Assembles fixed-size two-channel blocks from per-channel ring buffers.
///
/// Samples are popped into reusable scratch buffers, so assembling a block
/// costs no allocation. A block is only produced once both channels have a
/// full block available, which keeps the X and Y streams aligned.
pub struct BlockAssembler {
    x: HeapCons<f32>,
    y: HeapCons<f32>,
    block_size: usize,
    scratch_x: Vec<f32>,
    scratch_y: Vec<f32>,
}

impl BlockAssembler {
    /// Creates an assembler reading from the given channel consumers.
    #[must_use]
    pub fn new(x: HeapCons<f32>, y: HeapCons<f32>, block_size: usize) -> Self {
        Self {
            x,
            y,
            block_size,
            scratch_x: vec![0.0; block_size],
            scratch_y: vec![0.0; block_size],
        }
    }

    /// Returns `true` when a full block is available on both channels.
    #[must_use]
    pub fn has_block(&self) -> bool {
        self.x.occupied_len() >= self.block_size && self.y.occupied_len() >= self.block_size
    }

    /// Pops the next complete block into the scratch buffers.
    ///
    /// Returns `None` while either channel is short of a full block. The
    /// returned slices are valid until the next call.
    pub fn try_read_block(&mut self) -> Option<(&[f32], &[f32])> {
        if !self.has_block() {
            return None;
        }

        // has_block guarantees enough occupied samples on both sides.
        for slot in &mut self.scratch_x {
            *slot = self.x.try_pop().unwrap_or_default();
        }
        for slot in &mut self.scratch_y {
            *slot = self.y.try_pop().unwrap_or_default();
        }

        Some((&self.scratch_x, &self.scratch_y))
    }
}

/// Creates the producer ends and an assembler for a two-channel block pipe.
///
/// Each ring buffer holds up to `capacity_blocks` blocks per channel; the
/// device side drops samples when it outruns the tick side.
#[must_use]
pub fn block_pipe(
    block_size: usize,
    capacity_blocks: usize,
) -> ((HeapProd<f32>, HeapProd<f32>), BlockAssembler) {
    let capacity = (block_size * capacity_blocks).max(1);
    let (producer_x, consumer_x) = HeapRb::<f32>::new(capacity).split();
    let (producer_y, consumer_y) = HeapRb::<f32>::new(capacity).split();

    (
        (producer_x, producer_y),
        BlockAssembler::new(consumer_x, consumer_y, block_size),
    )
}

/// A mock host that generates synthetic blocks and drives a processor.
///
/// Queues whole blocks of silence, constant-level square waves, or sine
/// tones on both channels, then feeds them tick by tick. Suitable for CI -
/// no audio hardware is touched.
///
/// # Example
///
/// ```
/// use sound_capture::host::MockHost;
/// use sound_capture::SoundCapture;
///
/// let (mut processor, mut handle) = SoundCapture::builder()
///     .block_size(64)
///     .build()?;
///
/// let mut host = MockHost::new(64);
/// host.push_level(0.5, 2); // two loud blocks
/// host.push_silence(3); // enough silence to close the event
/// host.run(&mut processor);
///
/// assert!(handle.try_recv().is_some());
/// # Ok::<(), sound_capture::CaptureError>(())
/// ```
pub struct MockHost {
    block_size: usize,
    x: Vec<f32>,
    y: Vec<f32>,
    out_x: Vec<f32>,
    out_y: Vec<f32>,
    cursor: usize,
}

impl MockHost {
    /// Creates a mock host delivering blocks of `block_size` samples.
    #[must_use]
    pub fn new(block_size: usize) -> Self {
        Self {
            block_size,
            x: Vec::new(),
            y: Vec::new(),
            out_x: vec![0.0; block_size],
            out_y: vec![0.0; block_size],
            cursor: 0,
        }
    }

    /// Queues `blocks` blocks of silence on both channels.
    pub fn push_silence(&mut self, blocks: usize) {
        let samples = blocks * self.block_size;
        self.x.extend(std::iter::repeat(0.0).take(samples));
        self.y.extend(std::iter::repeat(0.0).take(samples));
    }

    /// Queues `blocks` blocks at a constant absolute level.
    ///
    /// The sign alternates per sample so the raw mean stays near zero, like
    /// a real waveform; the mean absolute amplitude equals `level`.
    pub fn push_level(&mut self, level: f32, blocks: usize) {
        let samples = blocks * self.block_size;
        for i in 0..samples {
            let sample = if i % 2 == 0 { level } else { -level };
            self.x.push(sample);
            self.y.push(sample);
        }
    }

    /// Queues `blocks` blocks of a sine tone at the given frequency.
    pub fn push_sine(&mut self, frequency: f64, sample_rate: u32, amplitude: f32, blocks: usize) {
        let samples = blocks * self.block_size;
        let rate = f64::from(sample_rate);
        for i in 0..samples {
            let t = i as f64 / rate;
            let value = (2.0 * std::f64::consts::PI * frequency * t).sin();
            let sample = amplitude * value as f32;
            self.x.push(sample);
            self.y.push(sample);
        }
    }

    /// Number of whole blocks queued and not yet fed.
    #[must_use]
    pub fn remaining_blocks(&self) -> usize {
        (self.x.len() - self.cursor) / self.block_size
    }

    /// Feeds the next queued block to the processor.
    ///
    /// Returns the processor's continue signal, or `None` when the queue is
    /// exhausted.
    pub fn step(&mut self, processor: &mut BlockProcessor) -> Option<bool> {
        let end = self.cursor + self.block_size;
        if end > self.x.len() {
            return None;
        }

        let x = &self.x[self.cursor..end];
        let y = &self.y[self.cursor..end];
        self.cursor = end;

        let keep_going = processor.process(
            &[x, y],
            &mut [&mut self.out_x[..], &mut self.out_y[..]],
        );
        Some(keep_going)
    }

    /// Runs until the queue is exhausted or the processor goes inert.
    ///
    /// Returns the last continue signal seen (`true` for an empty queue).
    pub fn run(&mut self, processor: &mut BlockProcessor) -> bool {
        let mut keep_going = true;
        while let Some(signal) = self.step(processor) {
            keep_going = signal;
            if !keep_going {
                break;
            }
        }
        keep_going
    }

    /// The bypass output of the most recent block, per channel.
    #[must_use]
    pub fn last_output(&self) -> (&[f32], &[f32]) {
        (&self.out_x, &self.out_y)
    }
}
