//! The real-time block processor.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::block::BlockInput;
use crate::channel::{Command, ControlLink, Notification};
use crate::detector::BlockMetrics;
use crate::pipeline::state::{CaptureMachine, CaptureState};
use crate::session::SharedState;
use crate::CaptureConfig;

/// The real-time entry point, invoked once per fixed-size audio block.
///
/// Runs on the host's audio callback and must finish within the tick
/// budget: it never blocks, performs no I/O, and all buffer growth is
/// amortized against pre-reserved capacity. The control channel is the only
/// boundary crossing - pending commands are applied at the start of each
/// tick and notifications are posted fire-and-forget.
///
/// Built together with its [`CaptureHandle`](crate::CaptureHandle) by
/// [`SoundCapture::builder()`](crate::SoundCapture::builder).
pub struct BlockProcessor {
    machine: CaptureMachine,
    link: ControlLink,
    shared: Arc<SharedState>,
    threshold: f32,
    running: bool,
}

impl BlockProcessor {
    pub(crate) fn new(config: &CaptureConfig, link: ControlLink, shared: Arc<SharedState>) -> Self {
        debug!(
            threshold = config.threshold,
            silence_tolerance = config.silence_tolerance,
            block_size = config.block_size,
            channels = config.channels,
            "block processor created"
        );

        Self {
            machine: CaptureMachine::new(config),
            link,
            shared,
            threshold: config.threshold,
            running: true,
        }
    }

    /// Processes one tick.
    ///
    /// `inputs` holds one sample slice per input channel (0 = X reference,
    /// 1 = Y signal); `outputs` receives a verbatim copy of the input (pure
    /// bypass - capture never alters the emitted audio).
    ///
    /// Returns whether the host should keep scheduling ticks: `false` after
    /// a stop command or a fatal input error, `true` otherwise. Once `false`
    /// the processor is inert and a new one must be built to resume.
    pub fn process(&mut self, inputs: &[&[f32]], outputs: &mut [&mut [f32]]) -> bool {
        self.apply_pending_commands();
        if !self.running {
            return false;
        }

        Self::bypass(inputs, outputs);

        match BlockInput::classify(inputs) {
            BlockInput::Absent => {
                // Happens occasionally while the host graph settles.
                warn!("no input this tick");
            }
            BlockInput::MissingSignal { .. } => {
                warn!("reference channel present without signal channel");
                self.post(Notification::Error {
                    reason: Notification::REASON_PROCESS.to_string(),
                });
                self.shutdown();
            }
            BlockInput::Stereo { x, y } => self.process_block(x, y),
        }

        self.running
    }

    /// Current lifecycle state of the capture machine.
    #[must_use]
    pub fn state(&self) -> CaptureState {
        self.machine.state()
    }

    /// Feeds one well-formed block through the detector and state machine.
    fn process_block(&mut self, x: &[f32], y: &[f32]) {
        let metrics = BlockMetrics::analyze(y, self.threshold);
        trace!(
            mean = metrics.mean,
            mean_abs = metrics.mean_abs,
            peak = metrics.peak,
            active = metrics.active,
            "block metrics"
        );

        self.shared.blocks_processed.fetch_add(1, Ordering::SeqCst);

        let was_capturing = self.machine.state() == CaptureState::Capturing;
        let closed = self.machine.advance(metrics.active, x, y);

        if metrics.active || was_capturing {
            self.shared
                .samples_captured
                .fetch_add(x.len() as u64, Ordering::SeqCst);
        }

        if let Some(event) = closed {
            self.shared.events_emitted.fetch_add(1, Ordering::SeqCst);
            self.post(Notification::SoundData(event));
        }
    }

    /// Copies every input channel verbatim into the matching output channel.
    fn bypass(inputs: &[&[f32]], outputs: &mut [&mut [f32]]) {
        for (channel, out) in outputs.iter_mut().enumerate() {
            if let Some(input) = inputs.get(channel) {
                let len = input.len().min(out.len());
                out[..len].copy_from_slice(&input[..len]);
            }
        }
    }

    /// Drains the command channel; commands apply before the tick's audio.
    fn apply_pending_commands(&mut self) {
        while let Ok(command) = self.link.commands.try_recv() {
            match command {
                Command::Stop => {
                    if self.running {
                        debug!("stop command received, discarding session");
                        self.shutdown();
                    } else {
                        warn!(?command, "ignoring command: processor already stopped");
                    }
                }
            }
        }
    }

    /// Resets all internal state and goes permanently inert.
    fn shutdown(&mut self) {
        self.machine.reset();
        self.running = false;
        self.shared.running.store(false, Ordering::SeqCst);
    }

    /// Posts a notification without blocking the tick.
    fn post(&self, notification: Notification) {
        // The controller may already be gone during teardown; nothing to do.
        if self.link.notifications.send(notification).is_err() {
            trace!("notification dropped: controller detached");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::{control_channel, ControllerLink};

    const LOUD: [f32; 4] = [0.5, -0.5, 0.5, -0.5];
    const QUIET: [f32; 4] = [0.0; 4];

    fn processor() -> (BlockProcessor, ControllerLink) {
        let config = CaptureConfig {
            block_size: 4,
            ..Default::default()
        };
        let (controller, link) = control_channel();
        let shared = Arc::new(SharedState::new());
        (BlockProcessor::new(&config, link, shared), controller)
    }

    fn tick(p: &mut BlockProcessor, x: &[f32], y: &[f32]) -> bool {
        let mut out_x = vec![0.0; x.len().max(y.len())];
        let mut out_y = vec![0.0; x.len().max(y.len())];
        p.process(&[x, y], &mut [&mut out_x[..], &mut out_y[..]])
    }

    #[test]
    fn test_bypass_copies_input_to_output() {
        let (mut p, _controller) = processor();

        let mut out_x = [0.0_f32; 4];
        let mut out_y = [0.0_f32; 4];
        let cont = p.process(&[&LOUD, &QUIET], &mut [&mut out_x[..], &mut out_y[..]]);

        assert!(cont);
        assert_eq!(out_x, LOUD);
        assert_eq!(out_y, QUIET);
    }

    #[test]
    fn test_no_input_continues() {
        let (mut p, mut controller) = processor();

        let cont = p.process(&[], &mut []);
        assert!(cont);
        assert!(controller.notifications.try_recv().is_err());

        // Processing resumes normally on the next tick.
        assert!(tick(&mut p, &LOUD, &LOUD));
        assert_eq!(p.state(), CaptureState::Capturing);
    }

    #[test]
    fn test_missing_signal_is_fatal() {
        let (mut p, mut controller) = processor();

        let mut out_x = [0.0_f32; 4];
        let cont = p.process(&[&LOUD], &mut [&mut out_x[..]]);

        assert!(!cont);
        match controller.notifications.try_recv().unwrap() {
            Notification::Error { reason } => assert_eq!(reason, "process"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_inert_after_error() {
        let (mut p, mut controller) = processor();

        let mut out_x = [0.0_f32; 4];
        p.process(&[&LOUD], &mut [&mut out_x[..]]);

        // Loud audio after the error changes nothing and emits nothing.
        for _ in 0..5 {
            assert!(!tick(&mut p, &LOUD, &LOUD));
        }
        assert_eq!(p.state(), CaptureState::Idle);
        controller.notifications.try_recv().unwrap(); // the error
        assert!(controller.notifications.try_recv().is_err());
    }

    #[test]
    fn test_capture_emits_sound_data() {
        let (mut p, mut controller) = processor();

        tick(&mut p, &LOUD, &LOUD);
        tick(&mut p, &LOUD, &LOUD);
        tick(&mut p, &QUIET, &QUIET);
        tick(&mut p, &QUIET, &QUIET);
        tick(&mut p, &QUIET, &QUIET);

        match controller.notifications.try_recv().unwrap() {
            Notification::SoundData(event) => {
                assert_eq!(event.len(), 20); // 5 blocks of 4
                assert_eq!(event.samples_x.len(), event.samples_y.len());
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert_eq!(p.state(), CaptureState::Idle);
    }

    #[test]
    fn test_stop_applies_at_next_tick() {
        let (mut p, controller) = processor();

        tick(&mut p, &LOUD, &LOUD);
        assert_eq!(p.state(), CaptureState::Capturing);

        controller.commands.send(Command::Stop).unwrap();
        assert!(!tick(&mut p, &LOUD, &LOUD));
        assert_eq!(p.state(), CaptureState::Idle);
    }

    #[test]
    fn test_stop_while_capturing_discards_session() {
        let (mut p, mut controller) = processor();

        tick(&mut p, &LOUD, &LOUD);
        tick(&mut p, &LOUD, &LOUD);
        tick(&mut p, &LOUD, &LOUD);

        controller.commands.send(Command::Stop).unwrap();
        assert!(!tick(&mut p, &QUIET, &QUIET));
        assert!(controller.notifications.try_recv().is_err());
    }

    #[test]
    fn test_stop_when_idle_is_noop() {
        let (mut p, mut controller) = processor();

        controller.commands.send(Command::Stop).unwrap();
        assert!(!tick(&mut p, &QUIET, &QUIET));
        assert!(controller.notifications.try_recv().is_err());

        // A second stop is logged and ignored.
        controller.commands.send(Command::Stop).unwrap();
        assert!(!tick(&mut p, &QUIET, &QUIET));
        assert!(controller.notifications.try_recv().is_err());
    }

    #[test]
    fn test_stats_updated_per_block() {
        let config = CaptureConfig {
            block_size: 4,
            ..Default::default()
        };
        let (_controller, link) = control_channel();
        let shared = Arc::new(SharedState::new());
        let mut p = BlockProcessor::new(&config, link, Arc::clone(&shared));

        tick(&mut p, &LOUD, &LOUD);
        tick(&mut p, &QUIET, &QUIET);

        assert_eq!(shared.blocks_processed.load(Ordering::SeqCst), 2);
        // Both blocks appended: one active, one padded silent.
        assert_eq!(shared.samples_captured.load(Ordering::SeqCst), 8);
    }
}
