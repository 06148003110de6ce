//! Control-channel message types and wiring.
//!
//! Two unbounded mpsc channels, one per direction, connect the non-real-time
//! controller to the real-time processor:
//!
//! ```text
//! controller --- Command ------> processor   (applied at next tick start)
//! controller <-- Notification -- processor   (fire-and-forget posting)
//! ```
//!
//! The real-time side only ever enqueues (`send` on an unbounded channel
//! never blocks) or drains with `try_recv`; the control side only ever
//! dequeues. Commands never preempt a tick in progress.

use tokio::sync::mpsc;

use crate::CaptureEvent;

/// Commands flowing from the controller into the processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Terminal shutdown: discard any in-progress session and go inert.
    ///
    /// Honored at the start of the processor's next tick. Not a pause - a
    /// stopped processor cannot resume and must be recreated.
    Stop,
}

/// Notifications flowing from the processor out to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// A capture session closed; carries the finished event.
    SoundData(CaptureEvent),

    /// The processor hit a fatal condition and requests teardown.
    Error {
        /// What failed; [`Notification::REASON_PROCESS`] for a malformed
        /// input block.
        reason: String,
    },
}

impl Notification {
    /// Reason reported when an input tick has a reference channel but no
    /// signal channel.
    pub const REASON_PROCESS: &'static str = "process";
}

/// Processor-side endpoints of the control channel.
pub(crate) struct ControlLink {
    pub commands: mpsc::UnboundedReceiver<Command>,
    pub notifications: mpsc::UnboundedSender<Notification>,
}

/// Controller-side endpoints of the control channel.
pub(crate) struct ControllerLink {
    pub commands: mpsc::UnboundedSender<Command>,
    pub notifications: mpsc::UnboundedReceiver<Notification>,
}

/// Creates the paired per-direction channels.
pub(crate) fn control_channel() -> (ControllerLink, ControlLink) {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (notification_tx, notification_rx) = mpsc::unbounded_channel();

    (
        ControllerLink {
            commands: command_tx,
            notifications: notification_rx,
        },
        ControlLink {
            commands: command_rx,
            notifications: notification_tx,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_round_trip() {
        let (controller, mut processor) = control_channel();

        controller.commands.send(Command::Stop).unwrap();
        assert!(matches!(processor.commands.try_recv(), Ok(Command::Stop)));
        assert!(processor.commands.try_recv().is_err());
    }

    #[test]
    fn test_notification_round_trip() {
        let (mut controller, processor) = control_channel();

        processor
            .notifications
            .send(Notification::Error {
                reason: Notification::REASON_PROCESS.to_string(),
            })
            .unwrap();

        match controller.notifications.try_recv() {
            Ok(Notification::Error { reason }) => assert_eq!(reason, "process"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_notifications_are_fifo() {
        let (mut controller, processor) = control_channel();

        let first = CaptureEvent::new(vec![0.1], vec![0.2]);
        let second = CaptureEvent::new(vec![0.3], vec![0.4]);
        processor
            .notifications
            .send(Notification::SoundData(first.clone()))
            .unwrap();
        processor
            .notifications
            .send(Notification::SoundData(second.clone()))
            .unwrap();

        assert_eq!(
            controller.notifications.try_recv().unwrap(),
            Notification::SoundData(first)
        );
        assert_eq!(
            controller.notifications.try_recv().unwrap(),
            Notification::SoundData(second)
        );
    }
}
