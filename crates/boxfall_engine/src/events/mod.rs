//! Event sources feeding the main loop
//!
//! The loop polls its source once per frame and routes whatever comes back,
//! in the order given. Two sources are provided:
//! - [`ScriptedEventSource`]: immediate queue plus a frame-deferred queue,
//!   for demos and tests
//! - [`ChannelEventSource`]: drains an `mpsc` channel fed by a windowing thread

use std::sync::mpsc::Receiver;

use crate::input::InputEvent;

/// Supplier of input events, polled once per frame
pub trait EventSource {
    /// Events that arrived since the last poll, oldest first
    fn poll(&mut self, frame: u64) -> Vec<InputEvent>;
}

impl<E: EventSource + ?Sized> EventSource for Box<E> {
    fn poll(&mut self, frame: u64) -> Vec<InputEvent> {
        (**self).poll(frame)
    }
}

/// Event source with queued and frame-scheduled events
#[derive(Debug, Default)]
pub struct ScriptedEventSource {
    immediate_queue: Vec<InputEvent>,
    deferred_queue: Vec<(u64, InputEvent)>,
}

impl ScriptedEventSource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event for the next poll
    pub fn send(&mut self, event: InputEvent) {
        self.immediate_queue.push(event);
    }

    /// Queue an event for delivery on or after `frame`
    pub fn post(&mut self, frame: u64, event: InputEvent) {
        self.deferred_queue.push((frame, event));
    }

    /// Builder form of [`post`](Self::post)
    pub fn with_event_at(mut self, frame: u64, event: InputEvent) -> Self {
        self.post(frame, event);
        self
    }

    /// Events not yet delivered
    pub fn pending(&self) -> usize {
        self.immediate_queue.len() + self.deferred_queue.len()
    }

    /// Drop every queued event
    pub fn clear(&mut self) {
        self.immediate_queue.clear();
        self.deferred_queue.clear();
    }
}

impl EventSource for ScriptedEventSource {
    fn poll(&mut self, frame: u64) -> Vec<InputEvent> {
        let mut delivered = std::mem::take(&mut self.immediate_queue);

        // Due deferred events keep the order they were posted in
        let mut i = 0;
        while i < self.deferred_queue.len() {
            if self.deferred_queue[i].0 <= frame {
                let (_, event) = self.deferred_queue.remove(i);
                delivered.push(event);
            } else {
                i += 1;
            }
        }

        delivered
    }
}

/// Event source fed through a channel
pub struct ChannelEventSource {
    receiver: Receiver<InputEvent>,
    disconnected_logged: bool,
}

impl ChannelEventSource {
    /// Wrap the receiving half of a channel
    pub fn new(receiver: Receiver<InputEvent>) -> Self {
        Self {
            receiver,
            disconnected_logged: false,
        }
    }
}

impl EventSource for ChannelEventSource {
    fn poll(&mut self, _frame: u64) -> Vec<InputEvent> {
        let mut delivered = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(event) => delivered.push(event),
                Err(std::sync::mpsc::TryRecvError::Empty) => break,
                Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                    if !self.disconnected_logged {
                        log::warn!("Event channel disconnected; no further input will arrive");
                        self.disconnected_logged = true;
                    }
                    break;
                }
            }
        }
        delivered
    }
}
