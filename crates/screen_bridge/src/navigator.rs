//! One-shot navigation channel between screens.

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError, TrySendError};
use shared::protocol::{OutboundMessage, ScreenRoute};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("cannot navigate to {rejected}: another navigation is in flight")]
    Busy { rejected: ScreenRoute },
    #[error("navigation channel disconnected")]
    Disconnected,
}

/// Holds at most one message: the hand-off from the screen that just exited
/// to the screen about to be entered.
pub struct Navigator {
    tx: Sender<OutboundMessage>,
    rx: Receiver<OutboundMessage>,
}

impl Navigator {
    pub fn new() -> Self {
        let (tx, rx) = bounded(1);
        Self { tx, rx }
    }

    pub fn dispatch(&self, message: OutboundMessage) -> Result<(), NavigationError> {
        let destination = message.destination;
        match self.tx.try_send(message) {
            Ok(()) => {
                tracing::debug!(screen = %destination, "queued navigation");
                Ok(())
            }
            Err(TrySendError::Full(_)) => {
                tracing::warn!(screen = %destination, "navigation already in flight");
                Err(NavigationError::Busy {
                    rejected: destination,
                })
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::error!(screen = %destination, "navigation channel disconnected");
                Err(NavigationError::Disconnected)
            }
        }
    }

    /// Takes the pending hand-off, if any.
    pub fn next(&self) -> Result<Option<OutboundMessage>, NavigationError> {
        match self.rx.try_recv() {
            Ok(message) => Ok(Some(message)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(NavigationError::Disconnected),
        }
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use shared::protocol::ScreenParams;

    use super::*;

    #[test]
    fn delivers_one_message_then_drains() {
        let navigator = Navigator::new();
        navigator
            .dispatch(OutboundMessage::entry())
            .expect("dispatch");
        let delivered = navigator.next().expect("next").expect("message");
        assert_eq!(delivered.destination, ScreenRoute::Login);
        assert_eq!(navigator.next().expect("next"), None);
    }

    #[test]
    fn rejects_second_hand_off_while_one_is_pending() {
        let navigator = Navigator::new();
        navigator
            .dispatch(OutboundMessage::entry())
            .expect("dispatch");
        let err = navigator
            .dispatch(OutboundMessage::new(
                ScreenRoute::Home,
                ScreenParams::new(),
                false,
            ))
            .expect_err("busy");
        assert_eq!(
            err,
            NavigationError::Busy {
                rejected: ScreenRoute::Home
            }
        );
        let delivered = navigator.next().expect("next").expect("message");
        assert_eq!(delivered.destination, ScreenRoute::Login);
    }
}
