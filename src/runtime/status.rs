//! Read-only status snapshot for the display.

use std::fmt;

use crate::core::{Department, Event, LogLine};

/// Pool and queue state of one department.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepartmentStatus {
    /// Department.
    pub department: Department,
    /// Free units.
    pub available: u32,
    /// Configured units.
    pub max: u32,
    /// Events waiting in the inbound queue.
    pub queue_depth: usize,
}

impl DepartmentStatus {
    /// Units of this department's pool currently committed to handlers.
    #[must_use]
    pub const fn active(&self) -> u32 {
        self.max.saturating_sub(self.available)
    }
}

/// Point-in-time view of the whole system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemStatus {
    /// Pending events, most urgent first.
    pub pending: Vec<Event>,
    /// Per-department state, in [`Department::ALL`] order.
    pub departments: Vec<DepartmentStatus>,
    /// Most recent log lines, oldest first.
    pub recent_log: Vec<LogLine>,
}

impl SystemStatus {
    /// State of `department`.
    #[must_use]
    pub fn department(&self, department: Department) -> Option<&DepartmentStatus> {
        self.departments.iter().find(|d| d.department == department)
    }
}

impl fmt::Display for SystemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- LOG MESSAGES ---")?;
        writeln!(f)?;
        for line in &self.recent_log {
            writeln!(f, "{line}")?;
        }
        writeln!(f)?;
        writeln!(f, "---------------------")?;

        writeln!(f)?;
        writeln!(f, "--- SYSTEM STATUS ---")?;
        writeln!(f)?;
        writeln!(f, "Pending Calls: {}", self.pending.len())?;
        for (i, event) in self.pending.iter().enumerate() {
            writeln!(
                f,
                "  [{}] {} (priority {})",
                i + 1,
                event.department,
                event.priority
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Active Department Tasks:")?;
        for d in &self.departments {
            writeln!(f, "  {:<16} {}", format!("{}:", d.department), d.active())?;
        }
        writeln!(f)?;
        writeln!(f, "Resources Available:")?;
        for d in &self.departments {
            writeln!(
                f,
                "  {:<16} {}/{}",
                format!("{}:", d.department),
                d.available,
                d.max
            )?;
        }
        writeln!(f)?;
        writeln!(f, "Queue Lengths:")?;
        for d in &self.departments {
            writeln!(f, "  {:<16} {}", format!("{}:", d.department), d.queue_depth)?;
        }
        writeln!(f)?;
        writeln!(f, "---------------------")
    }
}
