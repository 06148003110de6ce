//! The per-block capture lifecycle.

use tracing::debug;

use crate::pipeline::buffer::CaptureSession;
use crate::{CaptureConfig, CaptureEvent};

/// Lifecycle state of the capture machine.
///
/// Closing a session returns to [`Idle`](Self::Idle); there is no separate
/// terminal state. The one-shot shutdown after a stop command or input
/// error lives in the processor's continue-signal, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    /// No session in progress; waiting for sound onset.
    #[default]
    Idle,
    /// A session is accumulating blocks.
    Capturing,
}

/// Drives the idle/capturing lifecycle one block at a time.
///
/// Owns the single [`CaptureSession`]; the session is created implicitly on
/// the first active block and destroyed on close or reset.
pub(crate) struct CaptureMachine {
    silence_tolerance: u32,
    event_capacity: usize,
    state: CaptureState,
    session: CaptureSession,
}

impl CaptureMachine {
    pub fn new(config: &CaptureConfig) -> Self {
        Self {
            silence_tolerance: config.silence_tolerance,
            event_capacity: config.event_capacity,
            state: CaptureState::default(),
            session: CaptureSession::new(),
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Advances the machine by one block where both channels are present.
    ///
    /// `active` is the threshold detector's decision for the block. Returns
    /// the finished event when this block closes the session: the session
    /// closes on the block that pushes the silence run past the tolerance,
    /// and that closing block is still part of the capture.
    pub fn advance(&mut self, active: bool, x: &[f32], y: &[f32]) -> Option<CaptureEvent> {
        if active {
            if self.state == CaptureState::Idle {
                debug!("sound onset, session opened");
                self.session.open(self.event_capacity);
                self.state = CaptureState::Capturing;
            }
            self.session.mark_active();
            self.session.append(x, y);
            return None;
        }

        match self.state {
            CaptureState::Capturing => {
                // Silence inside the tolerance window stays in the capture.
                let run = self.session.mark_silent();
                self.session.append(x, y);

                if run > self.silence_tolerance {
                    let event = self.session.take();
                    self.state = CaptureState::Idle;
                    debug!(
                        samples = event.len(),
                        silent_blocks = run,
                        "silence exceeded tolerance, session closed"
                    );
                    return Some(event);
                }
                None
            }
            CaptureState::Idle => {
                self.session.mark_silent();
                None
            }
        }
    }

    /// Discards any in-progress session and returns to `Idle`.
    ///
    /// Used by the stop command and the malformed-input path; no event is
    /// emitted for the discarded session.
    pub fn reset(&mut self) {
        self.session.clear();
        self.state = CaptureState::Idle;
    }
}
