//! Per-department inbound queues.

use tokio::sync::mpsc;

use crate::core::{Department, Event};

/// Sending halves of the three department queues.
#[derive(Debug, Clone)]
pub struct Routes {
    senders: [mpsc::Sender<Event>; 3],
}

impl Routes {
    /// Sender for `department`'s queue.
    #[must_use]
    pub fn sender(&self, department: Department) -> &mpsc::Sender<Event> {
        &self.senders[department.index()]
    }

    /// Events currently waiting in `department`'s queue.
    #[must_use]
    pub fn depth(&self, department: Department) -> usize {
        let tx = self.sender(department);
        tx.max_capacity() - tx.capacity()
    }
}

/// Create one bounded FIFO per department, each holding `depth` events.
/// Receivers are returned in [`Department::ALL`] order.
#[must_use]
pub fn inbound_queues(depth: usize) -> (Routes, [mpsc::Receiver<Event>; 3]) {
    let [(police_tx, police_rx), (ambulance_tx, ambulance_rx), (fire_tx, fire_rx)] =
        Department::ALL.map(|_| mpsc::channel(depth));
    (
        Routes {
            senders: [police_tx, ambulance_tx, fire_tx],
        },
        [police_rx, ambulance_rx, fire_rx],
    )
}
