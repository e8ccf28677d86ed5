//! User input surface.
//!
//! Low-level capture (pointer, touch, keys) is an external collaborator;
//! it feeds decoded events onto a channel the sequencer and overlays
//! consume.

use tokio::sync::mpsc;

/// A decoded user input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Pointer/touch click or tap.
    Click,
    /// Escape key.
    Escape,
    /// Horizontal swipe to the left.
    SwipeLeft,
    /// Horizontal swipe to the right.
    SwipeRight,
}

/// Sending half of the input surface.
#[derive(Debug, Clone)]
pub struct InputBus {
    tx: mpsc::UnboundedSender<InputEvent>,
}

impl InputBus {
    /// Creates a connected bus/receiver pair.
    #[must_use]
    pub fn channel() -> (Self, InputReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, InputReceiver { rx })
    }

    /// Delivers one input event. Dropped silently once the receiver is
    /// gone.
    pub fn press(&self, event: InputEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!(?event, "input dropped; no consumer");
        }
    }
}

/// Receiving half of the input surface.
#[derive(Debug)]
pub struct InputReceiver {
    rx: mpsc::UnboundedReceiver<InputEvent>,
}

impl InputReceiver {
    /// Awaits the next event. `None` once all senders are gone.
    pub async fn next(&mut self) -> Option<InputEvent> {
        self.rx.recv().await
    }

    /// Awaits the next click, discarding other events.
    ///
    /// Consuming exactly one click from here is what makes the
    /// sequencer's enter listener one-shot.
    pub async fn next_click(&mut self) -> Option<InputEvent> {
        while let Some(event) = self.rx.recv().await {
            if event == InputEvent::Click {
                return Some(event);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_press_and_receive() {
        let (bus, mut rx) = InputBus::channel();
        bus.press(InputEvent::Click);
        bus.press(InputEvent::Escape);

        assert_eq!(rx.next().await, Some(InputEvent::Click));
        assert_eq!(rx.next().await, Some(InputEvent::Escape));
    }

    #[tokio::test]
    async fn test_next_click_skips_other_events() {
        let (bus, mut rx) = InputBus::channel();
        bus.press(InputEvent::SwipeLeft);
        bus.press(InputEvent::Escape);
        bus.press(InputEvent::Click);

        assert_eq!(rx.next_click().await, Some(InputEvent::Click));
    }

    #[tokio::test]
    async fn test_press_after_receiver_dropped() {
        let (bus, rx) = InputBus::channel();
        drop(rx);
        bus.press(InputEvent::Click);
        // Should not panic
    }
}
