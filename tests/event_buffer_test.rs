//! Ordering and capacity tests for the pending-event buffer.

use std::sync::Arc;
use std::thread;

use emergency_dispatch::core::{Department, DispatchError, Event, EventBuffer, Priority};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn evt(id: u64, priority: u8) -> Event {
    Event::new(id, Department::Ambulance, Priority::new(priority).unwrap())
}

/// Sorted by priority descending, ids ascending within a tier.
fn assert_ordered(events: &[Event]) {
    for pair in events.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        assert!(a.priority >= b.priority, "priority order broken: {a:?} before {b:?}");
        if a.priority == b.priority {
            assert!(a.id < b.id, "tier FIFO broken: {a:?} before {b:?}");
        }
    }
}

#[test]
fn test_ascending_inserts_come_out_descending() {
    let buf = EventBuffer::new(10);
    buf.insert(evt(1, 1)).unwrap();
    buf.insert(evt(2, 2)).unwrap();
    buf.insert(evt(3, 3)).unwrap();

    let priorities: Vec<u8> = buf.snapshot().iter().map(|e| e.priority.get()).collect();
    assert_eq!(priorities, vec![3, 2, 1]);

    let first = buf.take_highest().unwrap();
    assert_eq!(first.priority.get(), 3);
    assert_eq!(buf.len(), 2);
}

#[test]
fn test_random_sequences_keep_invariants() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..100 {
        let buf = EventBuffer::new(10);
        let mut next_id = 0;
        for _ in 0..40 {
            if rng.random_bool(0.6) {
                next_id += 1;
                let before = buf.snapshot();
                let result = buf.insert(evt(next_id, rng.random_range(1..=3)));
                if before.len() == buf.capacity() {
                    assert_eq!(result, Err(DispatchError::BufferFull { capacity: 10 }));
                    assert_eq!(buf.snapshot(), before);
                } else {
                    assert!(result.is_ok());
                    assert_eq!(buf.len(), before.len() + 1);
                }
            } else {
                let before = buf.snapshot();
                match buf.take_highest() {
                    Some(e) => {
                        assert_eq!(e, before[0]);
                        assert_eq!(buf.snapshot(), before[1..].to_vec());
                    }
                    None => assert!(before.is_empty()),
                }
            }
            assert!(buf.len() <= buf.capacity());
            assert_ordered(&buf.snapshot());
        }
    }
}

#[test]
fn test_ties_leave_in_arrival_order() {
    let buf = EventBuffer::new(10);
    for id in 1..=4 {
        buf.insert(evt(id, 2)).unwrap();
    }
    buf.insert(evt(5, 3)).unwrap();

    let order: Vec<u64> = std::iter::from_fn(|| buf.take_highest()).map(|e| e.id).collect();
    assert_eq!(order, vec![5, 1, 2, 3, 4]);
    assert!(buf.take_highest().is_none());
}

#[test]
fn test_empty_take_reports_none() {
    let buf = EventBuffer::new(10);
    assert!(buf.take_highest().is_none());
    assert_eq!(buf.len(), 0);
}

#[test]
fn test_concurrent_producers_and_consumer() {
    let buf = Arc::new(EventBuffer::new(10));
    let producers: Vec<_> = (0..4u64)
        .map(|p| {
            let buf = Arc::clone(&buf);
            thread::spawn(move || {
                let mut dropped = 0;
                for i in 0..50u64 {
                    let priority = u8::try_from(i % 3).unwrap() + 1;
                    if buf.insert(evt(p * 1000 + i, priority)).is_err() {
                        dropped += 1;
                    }
                }
                dropped
            })
        })
        .collect();
    let consumer = {
        let buf = Arc::clone(&buf);
        thread::spawn(move || {
            let mut taken = 0;
            for _ in 0..200 {
                if buf.take_highest().is_some() {
                    taken += 1;
                }
                assert!(buf.len() <= 10);
            }
            taken
        })
    };

    let dropped: u64 = producers.into_iter().map(|h| h.join().unwrap()).sum();
    let taken: u64 = consumer.join().unwrap();
    let remaining = u64::try_from(buf.len()).unwrap();
    assert_eq!(dropped + taken + remaining, 200);

    let left = buf.snapshot();
    for pair in left.windows(2) {
        assert!(pair[0].priority >= pair[1].priority);
    }
}
