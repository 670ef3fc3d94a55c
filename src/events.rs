//! Multi-producer, single-consumer event plumbing.
//!
//! Background work (the session queue, AVFoundation callbacks, window
//! delegate methods) publishes events; the UI thread drains them on its poll
//! timer and is the only place UI-observable state changes.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use crate::error::CaptureError;
use crate::geometry::Rect;

/// Sent by the floating window whenever the user moves or resizes it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowEvent {
    FrameChanged(Rect),
}

/// Results of camera work, produced off the UI thread.
#[derive(Debug, Clone, PartialEq)]
pub enum CameraEvent<S> {
    /// Answer to the OS permission prompt.
    AccessResolved(bool),
    PreviewReady(S),
    Failed(CaptureError),
    RunningChanged(bool),
    DeviceDisconnected,
}

pub struct EventBus<E> {
    sender: Sender<E>,
    receiver: Receiver<E>,
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { sender, receiver }
    }

    /// A cloneable handle for producers.
    pub fn publisher(&self) -> EventPublisher<E> {
        EventPublisher {
            sender: self.sender.clone(),
        }
    }

    pub fn try_recv(&self) -> Option<E> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            // The bus holds its own sender, so Disconnected cannot happen.
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Everything queued so far, oldest first.
    pub fn drain(&self) -> Vec<E> {
        let mut events = Vec::new();
        while let Some(event) = self.try_recv() {
            events.push(event);
        }
        events
    }
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct EventPublisher<E> {
    sender: Sender<E>,
}

// Manual impl: a derive would require `E: Clone`.
impl<E> Clone for EventPublisher<E> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<E> EventPublisher<E> {
    /// Queue an event. Silently dropped if the bus is gone, which only
    /// happens while the app is tearing down.
    pub fn publish(&self, event: E) {
        let _ = self.sender.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_preserves_order_across_publishers() {
        let bus = EventBus::new();
        let a = bus.publisher();
        let b = a.clone();
        a.publish(1);
        b.publish(2);
        a.publish(3);
        assert_eq!(bus.drain(), vec![1, 2, 3]);
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn publisher_works_from_another_thread() {
        let bus = EventBus::new();
        let publisher = bus.publisher();
        std::thread::spawn(move || publisher.publish(WindowEvent::FrameChanged(Rect::default())))
            .join()
            .unwrap();
        assert_eq!(bus.try_recv(), Some(WindowEvent::FrameChanged(Rect::default())));
    }
}
