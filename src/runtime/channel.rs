//! Bounded FIFO channel shared between activities (spawned VM threads).
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};

use crate::error::RuntimeError;
use crate::runtime::object::Object;

const DEFAULT_CAPACITY: usize = 64;

struct ChannelState {
    queue: VecDeque<Object>,
    closed: bool,
}

pub struct Channel {
    state: Mutex<ChannelState>,
    not_empty: Condvar,
    not_full: Condvar,
    capacity: usize,
}

impl Channel {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            state: Mutex::new(ChannelState { queue: VecDeque::new(), closed: false }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            capacity,
        }
    }

    /// Blocks until there is room, the channel closes, or `cancelled` is
    /// signalled. The value moves into the queue, so sender and receiver
    /// never alias it.
    pub fn send(&self, value: Object, cancelled: &AtomicBool) -> Result<(), RuntimeError> {
        let mut state = self.state.lock().unwrap();
        loop {
            if cancelled.load(Ordering::Relaxed) {
                return Err(RuntimeError::Cancelled);
            }
            if state.closed {
                return Err(RuntimeError::SendOnClosedChannel);
            }
            if state.queue.len() < self.capacity {
                state.queue.push_back(value);
                self.not_empty.notify_one();
                return Ok(());
            }
            let (guard, _) = self
                .not_full
                .wait_timeout(state, std::time::Duration::from_millis(50))
                .unwrap();
            state = guard;
        }
    }

    /// Blocks until a value is available, the channel closes, or
    /// `cancelled` fires. Recv on an empty, closed channel yields
    /// `Object::Null` rather than an error.
    pub fn recv(&self, cancelled: &AtomicBool) -> Result<Object, RuntimeError> {
        let mut state = self.state.lock().unwrap();
        loop {
            if let Some(value) = state.queue.pop_front() {
                self.not_full.notify_one();
                return Ok(value);
            }
            if state.closed {
                return Ok(Object::Null);
            }
            if cancelled.load(Ordering::Relaxed) {
                return Err(RuntimeError::Cancelled);
            }
            let (guard, _) = self
                .not_empty
                .wait_timeout(state, std::time::Duration::from_millis(50))
                .unwrap();
            state = guard;
        }
    }

    pub fn close(&self) {
        let mut state = self.state.lock().unwrap();
        state.closed = true;
        self.not_empty.notify_all();
        self.not_full.notify_all();
    }
}

impl Default for Channel {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Channel")
    }
}

impl PartialEq for Channel {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

pub fn new_shared() -> Arc<Channel> {
    Arc::new(Channel::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_recv_roundtrip() {
        let chan = Channel::new();
        let cancelled = AtomicBool::new(false);
        chan.send(Object::Integer(1), &cancelled).unwrap();
        assert_eq!(chan.recv(&cancelled).unwrap(), Object::Integer(1));
    }

    #[test]
    fn test_recv_on_closed_empty_yields_null() {
        let chan = Channel::new();
        let cancelled = AtomicBool::new(false);
        chan.close();
        assert_eq!(chan.recv(&cancelled).unwrap(), Object::Null);
    }

    #[test]
    fn test_send_on_closed_errors() {
        let chan = Channel::new();
        let cancelled = AtomicBool::new(false);
        chan.close();
        assert_eq!(chan.send(Object::Integer(1), &cancelled), Err(RuntimeError::SendOnClosedChannel));
    }

    #[test]
    fn test_cross_thread_rendezvous() {
        let chan = Arc::new(Channel::new());
        let cancelled = Arc::new(AtomicBool::new(false));
        let sender_chan = chan.clone();
        let sender_cancelled = cancelled.clone();
        let handle = std::thread::spawn(move || {
            sender_chan.send(Object::Integer(42), &sender_cancelled).unwrap();
        });
        let value = chan.recv(&cancelled).unwrap();
        handle.join().unwrap();
        assert_eq!(value, Object::Integer(42));
    }
}
