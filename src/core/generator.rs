//! Random emergency call generator.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::MsRange;
use crate::core::{Department, DispatchError, Event, EventBuffer, EventId, EventLog, Priority};

/// Produces random events at random intervals into the event buffer.
#[derive(Debug)]
pub struct EventGenerator {
    buffer: Arc<EventBuffer>,
    log: Arc<EventLog>,
    interval: MsRange,
    rng: StdRng,
    next_id: EventId,
}

impl EventGenerator {
    /// Create a generator. A `seed` makes the event stream reproducible.
    #[must_use]
    pub fn new(
        buffer: Arc<EventBuffer>,
        log: Arc<EventLog>,
        interval: MsRange,
        seed: Option<u64>,
    ) -> Self {
        let rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Self {
            buffer,
            log,
            interval,
            rng,
            next_id: 1,
        }
    }

    /// Run forever: generate, insert, sleep a random interval.
    pub async fn run(mut self) {
        loop {
            let _ = self.step();
            let delay = self.next_delay();
            tokio::time::sleep(delay).await;
        }
    }

    /// Create the next random event.
    pub fn generate(&mut self) -> Event {
        let department = Department::ALL[self.rng.random_range(0..Department::ALL.len())];
        let priority = Priority::ALL[self.rng.random_range(0..Priority::ALL.len())];
        let id = self.next_id;
        self.next_id += 1;
        Event::new(id, department, priority)
    }

    /// Generate one event and insert it. A full buffer drops the event.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::BufferFull`] when the event was dropped.
    pub fn step(&mut self) -> Result<Event, DispatchError> {
        let event = self.generate();
        match self.buffer.insert(event) {
            Ok(pos) => {
                tracing::debug!(
                    event = event.id,
                    department = %event.department,
                    priority = %event.priority,
                    pos,
                    "event generated"
                );
                Ok(event)
            }
            Err(e) => {
                self.log
                    .warn("Warning: Event generation buffer full. Event dropped.");
                Err(e)
            }
        }
    }

    /// Draw the delay before the next event.
    pub fn next_delay(&mut self) -> Duration {
        self.interval.sample(&mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator(capacity: usize, seed: u64) -> EventGenerator {
        EventGenerator::new(
            Arc::new(EventBuffer::new(capacity)),
            Arc::new(EventLog::new(10)),
            MsRange::new(1000, 2000),
            Some(seed),
        )
    }

    #[test]
    fn test_seeded_streams_match() {
        let mut a = generator(10, 42);
        let mut b = generator(10, 42);
        for _ in 0..20 {
            assert_eq!(a.generate(), b.generate());
        }
    }

    #[test]
    fn test_ids_increase() {
        let mut g = generator(10, 1);
        let first = g.generate();
        let second = g.generate();
        assert_eq!(second.id, first.id + 1);
    }

    #[test]
    fn test_every_priority_generated() {
        let mut g = generator(10, 11);
        let mut seen = [false; 3];
        for _ in 0..200 {
            let event = g.generate();
            seen[usize::from(event.priority.get() - Priority::MIN)] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn test_delay_in_range() {
        let mut g = generator(10, 3);
        for _ in 0..50 {
            let d = g.next_delay();
            assert!(d >= Duration::from_millis(1000) && d < Duration::from_millis(2000));
        }
    }

    #[test]
    fn test_full_buffer_logs_drop() {
        let log = Arc::new(EventLog::new(10));
        let mut g = EventGenerator::new(
            Arc::new(EventBuffer::new(1)),
            Arc::clone(&log),
            MsRange::fixed(10),
            Some(5),
        );
        assert!(g.step().is_ok());
        assert!(matches!(g.step(), Err(DispatchError::BufferFull { capacity: 1 })));
        assert!(log.contains("Event generation buffer full"));
    }
}
