//! Counting pool of responder units for one department.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::core::{Department, DispatchError};

/// Responder units owned by a department.
///
/// Uses a lock-free `AtomicU32` for the available count. Individual units have
/// no identity; only the count is tracked. Callers that borrow from a sibling
/// pool must remember which pool lent the unit.
#[derive(Debug)]
pub struct ResourcePool {
    department: Department,
    max: u32,
    available: AtomicU32,
}

impl ResourcePool {
    /// Create a full pool with `max` units.
    #[must_use]
    pub const fn new(department: Department, max: u32) -> Self {
        Self {
            department,
            max,
            available: AtomicU32::new(max),
        }
    }

    /// Department owning this pool.
    #[must_use]
    pub const fn department(&self) -> Department {
        self.department
    }

    /// Configured unit count.
    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }

    /// Units currently free. Does not mutate.
    pub fn available(&self) -> u32 {
        self.available.load(Ordering::Acquire)
    }

    /// Units currently committed to handlers.
    pub fn in_use(&self) -> u32 {
        self.max - self.available()
    }

    /// Try to take one unit without waiting.
    /// Returns true if a unit was reserved, false if the pool is empty.
    pub fn try_acquire(&self) -> bool {
        let mut current = self.available.load(Ordering::Acquire);
        loop {
            if current == 0 {
                return false;
            }
            match self.available.compare_exchange_weak(
                current,
                current - 1,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return true,
                Err(actual) => current = actual,
            }
        }
    }

    /// Return one unit to the pool.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::OverRelease`] if the pool is already full; the
    /// count is left at `max`.
    pub fn release(&self) -> Result<(), DispatchError> {
        let mut current = self.available.load(Ordering::Acquire);
        loop {
            if current >= self.max {
                return Err(DispatchError::OverRelease {
                    department: self.department,
                    max: self.max,
                });
            }
            match self.available.compare_exchange_weak(
                current,
                current + 1,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return Ok(()),
                Err(actual) => current = actual,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_acquire_until_empty() {
        let pool = ResourcePool::new(Department::Fire, 2);
        assert!(pool.try_acquire());
        assert!(pool.try_acquire());
        assert!(!pool.try_acquire());
        assert_eq!(pool.available(), 0);
        assert_eq!(pool.in_use(), 2);
    }

    #[test]
    fn test_release_past_max_fails() {
        let pool = ResourcePool::new(Department::Ambulance, 3);
        assert_eq!(
            pool.release(),
            Err(DispatchError::OverRelease {
                department: Department::Ambulance,
                max: 3
            })
        );
        assert_eq!(pool.available(), 3);

        assert!(pool.try_acquire());
        pool.release().unwrap();
        assert_eq!(pool.available(), 3);
    }

    #[test]
    fn test_concurrent_acquire_never_exceeds_max() {
        let pool = Arc::new(ResourcePool::new(Department::Police, 4));
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let pool = Arc::clone(&pool);
                thread::spawn(move || pool.try_acquire())
            })
            .collect();

        let granted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(granted, 4);
        assert_eq!(pool.available(), 0);
    }
}
