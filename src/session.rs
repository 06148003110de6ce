//! Controller-side session context.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use crate::channel::{Command, ControllerLink, Notification};
use crate::error::CaptureError;

/// Counters published by the real-time tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureStats {
    /// Well-formed blocks fed through the detector.
    pub blocks_processed: u64,
    /// Per-channel samples appended to capture sessions, padded silence
    /// included.
    pub samples_captured: u64,
    /// Capture events emitted so far.
    pub events_emitted: u64,
}

/// State shared between the handle and the processor.
pub(crate) struct SharedState {
    pub running: AtomicBool,
    pub blocks_processed: AtomicU64,
    pub samples_captured: AtomicU64,
    pub events_emitted: AtomicU64,
}

impl SharedState {
    pub fn new() -> Self {
        Self {
            running: AtomicBool::new(true),
            blocks_processed: AtomicU64::new(0),
            samples_captured: AtomicU64::new(0),
            events_emitted: AtomicU64::new(0),
        }
    }
}

/// Handle held by the non-real-time controller.
///
/// Owns the controller ends of both control-channel directions plus the
/// shared counters - an explicit session context, so there is no
/// process-wide processor state anywhere. Commands sent here are honored at
/// the start of the processor's next tick.
///
/// # Example
///
/// ```ignore
/// let (processor, mut handle) = SoundCapture::builder().build()?;
/// // hand `processor` to the audio host, then:
/// while let Some(notification) = handle.recv().await {
///     match notification {
///         Notification::SoundData(event) => consume(event),
///         Notification::Error { reason } => tracing::error!(reason),
///     }
/// }
/// ```
pub struct CaptureHandle {
    link: ControllerLink,
    shared: Arc<SharedState>,
}

impl CaptureHandle {
    pub(crate) fn new(link: ControllerLink, shared: Arc<SharedState>) -> Self {
        Self {
            link,
            shared,
        }
    }

    /// Returns `true` until the processor honors a stop command or hits a
    /// fatal input error.
    ///
    /// Observed from the control context; flips on the tick that goes inert.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::SeqCst)
    }

    /// Returns a snapshot of the session counters.
    #[must_use]
    pub fn stats(&self) -> CaptureStats {
        CaptureStats {
            blocks_processed: self.shared.blocks_processed.load(Ordering::SeqCst),
            samples_captured: self.shared.samples_captured.load(Ordering::SeqCst),
            events_emitted: self.shared.events_emitted.load(Ordering::SeqCst),
        }
    }

    /// Requests terminal shutdown.
    ///
    /// An in-progress session is discarded without emitting an event and
    /// the processor goes permanently inert. Idempotent: stopping an idle
    /// or already-stopped processor is a no-op on its side.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::ProcessorDetached`] if the processor has
    /// been dropped.
    pub fn stop(&self) -> Result<(), CaptureError> {
        self.link
            .commands
            .send(Command::Stop)
            .map_err(|_| CaptureError::ProcessorDetached)
    }

    /// Receives the next notification, waiting until one arrives.
    ///
    /// Returns `None` once the processor has been dropped and the queue is
    /// drained.
    pub async fn recv(&mut self) -> Option<Notification> {
        self.link.notifications.recv().await
    }

    /// Non-blocking poll for a pending notification.
    #[must_use]
    pub fn try_recv(&mut self) -> Option<Notification> {
        self.link.notifications.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::control_channel;

    #[test]
    fn test_shared_state_starts_running() {
        let state = SharedState::new();
        assert!(state.running.load(Ordering::SeqCst));
        assert_eq!(state.blocks_processed.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_stats_default() {
        let stats = CaptureStats::default();
        assert_eq!(stats.blocks_processed, 0);
        assert_eq!(stats.samples_captured, 0);
        assert_eq!(stats.events_emitted, 0);
    }

    #[test]
    fn test_stats_snapshot() {
        let (controller, _link) = control_channel();
        let shared = Arc::new(SharedState::new());
        shared.blocks_processed.store(7, Ordering::SeqCst);
        shared.events_emitted.store(2, Ordering::SeqCst);

        let handle = CaptureHandle::new(controller, shared);
        let stats = handle.stats();
        assert_eq!(stats.blocks_processed, 7);
        assert_eq!(stats.events_emitted, 2);
    }

    #[test]
    fn test_stop_after_processor_dropped() {
        let (controller, link) = control_channel();
        let handle = CaptureHandle::new(controller, Arc::new(SharedState::new()));

        drop(link);
        assert!(matches!(
            handle.stop(),
            Err(CaptureError::ProcessorDetached)
        ));
    }

    #[test]
    fn test_try_recv_empty() {
        let (controller, _link) = control_channel();
        let mut handle = CaptureHandle::new(controller, Arc::new(SharedState::new()));
        assert!(handle.try_recv().is_none());
    }
}
