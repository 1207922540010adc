//! Emergency events, departments, and priorities.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::DispatchError;

/// Event identifier, assigned in generation order.
pub type EventId = u64;

/// Responder department an event is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Department {
    /// Police units.
    Police,
    /// Ambulance crews.
    Ambulance,
    /// Fire engines.
    Fire,
}

impl Department {
    /// Every department, in index order.
    pub const ALL: [Self; 3] = [Self::Police, Self::Ambulance, Self::Fire];

    /// Stable index used for per-department tables.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Police => 0,
            Self::Ambulance => 1,
            Self::Fire => 2,
        }
    }

    /// Operator-facing name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Police => "Police",
            Self::Ambulance => "Ambulance",
            Self::Fire => "Fire Department",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Event urgency, 1 (lowest) to 3 (highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Priority(u8);

impl Priority {
    /// Lowest accepted priority.
    pub const MIN: u8 = 1;
    /// Highest accepted priority.
    pub const MAX: u8 = 3;
    /// Every priority, lowest first.
    pub const ALL: [Self; 3] = [Self(1), Self(2), Self(3)];

    /// Validate and wrap a raw priority level.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidPriority`] outside `1..=3`.
    pub fn new(level: u8) -> Result<Self, DispatchError> {
        if level < Self::MIN || level > Self::MAX {
            return Err(DispatchError::InvalidPriority(level));
        }
        Ok(Self(level))
    }

    /// Raw level.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Priority {
    type Error = DispatchError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl From<Priority> for u8 {
    fn from(p: Priority) -> Self {
        p.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An emergency call. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Generation-order identifier.
    pub id: EventId,
    /// Department the call is for.
    pub department: Department,
    /// Urgency.
    pub priority: Priority,
}

impl Event {
    /// Create an event.
    #[must_use]
    pub const fn new(id: EventId, department: Department, priority: Priority) -> Self {
        Self {
            id,
            department,
            priority,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_bounds() {
        assert!(Priority::new(0).is_err());
        assert_eq!(Priority::new(1).unwrap().get(), 1);
        assert_eq!(Priority::new(3).unwrap().get(), 3);
        assert_eq!(Priority::new(4), Err(DispatchError::InvalidPriority(4)));
    }

    #[test]
    fn test_all_priorities_span_valid_range() {
        let levels: Vec<u8> = Priority::ALL.iter().map(|p| p.get()).collect();
        assert_eq!(levels, vec![Priority::MIN, 2, Priority::MAX]);
        for p in Priority::ALL {
            assert_eq!(Priority::new(p.get()), Ok(p));
        }
    }

    #[test]
    fn test_department_index_matches_all() {
        for (i, dept) in Department::ALL.iter().enumerate() {
            assert_eq!(dept.index(), i);
        }
        assert_eq!(Department::Fire.to_string(), "Fire Department");
    }

    #[test]
    fn test_event_serde_rejects_bad_priority() {
        let ok: Event =
            serde_json::from_str(r#"{"id":7,"department":"fire","priority":2}"#).unwrap();
        assert_eq!(ok.department, Department::Fire);
        assert_eq!(ok.priority.get(), 2);

        let bad = serde_json::from_str::<Event>(r#"{"id":7,"department":"fire","priority":9}"#);
        assert!(bad.is_err());
    }
}
