//! Bounded, priority-ordered buffer of pending events.
//!
//! Entries are kept sorted by priority descending. Within one priority tier the
//! insertion order is preserved, so the front of the buffer is always the most
//! urgent event that has waited longest. One `parking_lot::Mutex` guards the
//! whole buffer; inserts and removals never interleave.

use parking_lot::Mutex;

use crate::core::{DispatchError, Event};

/// Shared pending-event buffer.
#[derive(Debug)]
pub struct EventBuffer {
    capacity: usize,
    events: Mutex<Vec<Event>>,
}

impl EventBuffer {
    /// Create an empty buffer holding at most `capacity` events.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            events: Mutex::new(Vec::with_capacity(capacity)),
        }
    }

    /// Insert an event at its priority position and return that position.
    ///
    /// Scans from the tail past every entry of strictly lower priority, so the
    /// new event lands after existing entries of equal priority.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::BufferFull`] when the buffer is at capacity. The
    /// buffer is left unchanged and the event is dropped.
    pub fn insert(&self, event: Event) -> Result<usize, DispatchError> {
        let mut events = self.events.lock();
        if events.len() >= self.capacity {
            return Err(DispatchError::BufferFull {
                capacity: self.capacity,
            });
        }

        let mut pos = events.len();
        while pos > 0 && events[pos - 1].priority < event.priority {
            pos -= 1;
        }
        events.insert(pos, event);
        Ok(pos)
    }

    /// Remove and return the highest-priority event, earliest among ties.
    ///
    /// Returns `None` without mutation when the buffer is empty.
    pub fn take_highest(&self) -> Option<Event> {
        let mut events = self.events.lock();
        if events.is_empty() {
            return None;
        }
        Some(events.remove(0))
    }

    /// Ordered copy of the pending events.
    pub fn snapshot(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Whether no events are pending.
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Maximum number of pending events.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Department, Priority};

    fn evt(id: u64, priority: u8) -> Event {
        Event::new(id, Department::Police, Priority::new(priority).unwrap())
    }

    #[test]
    fn test_insert_positions() {
        let buf = EventBuffer::new(10);
        assert_eq!(buf.insert(evt(1, 1)).unwrap(), 0);
        assert_eq!(buf.insert(evt(2, 3)).unwrap(), 0);
        assert_eq!(buf.insert(evt(3, 2)).unwrap(), 1);
        // equal priority goes behind its tier
        assert_eq!(buf.insert(evt(4, 3)).unwrap(), 1);

        let ids: Vec<_> = buf.snapshot().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 4, 3, 1]);
    }

    #[test]
    fn test_take_highest_empty() {
        let buf = EventBuffer::new(3);
        assert!(buf.take_highest().is_none());
        assert!(buf.is_empty());
    }

    #[test]
    fn test_full_buffer_rejects() {
        let buf = EventBuffer::new(2);
        buf.insert(evt(1, 1)).unwrap();
        buf.insert(evt(2, 1)).unwrap();
        let before = buf.snapshot();

        assert_eq!(
            buf.insert(evt(3, 3)),
            Err(DispatchError::BufferFull { capacity: 2 })
        );
        assert_eq!(buf.snapshot(), before);
    }
}
