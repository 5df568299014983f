//! FIFO queue of pending events.

use std::collections::VecDeque;

/// Bounded FIFO of event ids awaiting dispatch.
#[derive(Debug)]
pub(crate) struct EventQueue<E> {
    events: VecDeque<E>,
    capacity: usize,
}

impl<E: Copy> EventQueue<E> {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            events: VecDeque::new(),
            capacity,
        }
    }

    /// Enqueue `event`, or return `false` if the queue is full.
    pub(crate) fn push(&mut self, event: E) -> bool {
        if self.events.len() >= self.capacity {
            return false;
        }
        self.events.push_back(event);
        true
    }

    pub(crate) fn pop(&mut self) -> Option<E> {
        self.events.pop_front()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = E> + '_ {
        self.events.iter().copied()
    }

    pub(crate) fn clear(&mut self) {
        self.events.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.events.len()
    }
}
