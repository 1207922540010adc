//! Simulation configuration.
//!
//! `SimulationConfig::default()` is the fixed operating profile; JSON loading
//! exists for tests and for running the binary against alternative profiles.

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::{Department, DispatchError};

/// Largest accepted department queue depth (tokio's channel permit limit).
pub const MAX_QUEUE_DEPTH: usize = tokio::sync::Semaphore::MAX_PERMITS;
/// Largest accepted pending-event buffer.
pub const MAX_BUFFER_CAPACITY: usize = 65_536;
/// Largest accepted operator log.
pub const MAX_LOG_CAPACITY: usize = 65_536;

/// Half-open uniform range of milliseconds, `[min_ms, max_ms)`.
/// `min_ms == max_ms` is a fixed delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsRange {
    /// Inclusive lower bound.
    pub min_ms: u64,
    /// Exclusive upper bound.
    pub max_ms: u64,
}

impl MsRange {
    /// Create a range.
    #[must_use]
    pub const fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    /// Constant delay.
    #[must_use]
    pub const fn fixed(ms: u64) -> Self {
        Self::new(ms, ms)
    }

    /// Draw a duration.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.max_ms <= self.min_ms {
            return Duration::from_millis(self.min_ms);
        }
        Duration::from_millis(rng.random_range(self.min_ms..self.max_ms))
    }

    fn validate(&self, name: &str) -> Result<(), String> {
        if self.max_ms < self.min_ms {
            return Err(format!(
                "{name}: max_ms ({}) below min_ms ({})",
                self.max_ms, self.min_ms
            ));
        }
        Ok(())
    }
}

/// Responder units per department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentCapacities {
    /// Police units.
    pub police: u32,
    /// Ambulance crews.
    pub ambulance: u32,
    /// Fire engines.
    pub fire: u32,
}

impl DepartmentCapacities {
    /// Units for `department`.
    #[must_use]
    pub const fn get(&self, department: Department) -> u32 {
        match department {
            Department::Police => self.police,
            Department::Ambulance => self.ambulance,
            Department::Fire => self.fire,
        }
    }

    /// Total units across all departments.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.police
            .saturating_add(self.ambulance)
            .saturating_add(self.fire)
    }
}

impl Default for DepartmentCapacities {
    fn default() -> Self {
        Self {
            police: 4,
            ambulance: 3,
            fire: 2,
        }
    }
}

/// Root simulation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Responder units per department.
    pub capacities: DepartmentCapacities,
    /// Inbound queue depth per department.
    pub queue_depth: usize,
    /// Pending-event buffer capacity.
    pub buffer_capacity: usize,
    /// Delay between dispatcher cycles.
    pub dispatch_period_ms: u64,
    /// Bound on the dispatcher's send into a department queue.
    pub route_timeout_ms: u64,
    /// Delay between generated events.
    pub generation_interval: MsRange,
    /// Simulated service time per event.
    pub service_time: MsRange,
    /// Worker pause after requeueing an unserved event.
    pub backoff_ms: u64,
    /// Retained operator log lines.
    pub log_capacity: usize,
    /// Status display refresh period.
    pub display_period_ms: u64,
    /// Seed for reproducible generation; entropy-seeded when absent.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            capacities: DepartmentCapacities::default(),
            queue_depth: 5,
            buffer_capacity: 10,
            dispatch_period_ms: 1500,
            route_timeout_ms: 100,
            generation_interval: MsRange::new(1000, 2000),
            service_time: MsRange::new(3000, 8000),
            backoff_ms: 500,
            log_capacity: 10,
            display_period_ms: 500,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidConfig`] describing the first bad value.
    pub fn validate(&self) -> Result<(), DispatchError> {
        self.check().map_err(DispatchError::InvalidConfig)
    }

    fn check(&self) -> Result<(), String> {
        for dept in Department::ALL {
            if self.capacities.get(dept) == 0 {
                return Err(format!("{dept} capacity must be greater than 0"));
            }
        }
        bounded("queue_depth", self.queue_depth, MAX_QUEUE_DEPTH)?;
        bounded("buffer_capacity", self.buffer_capacity, MAX_BUFFER_CAPACITY)?;
        bounded("log_capacity", self.log_capacity, MAX_LOG_CAPACITY)?;
        if self.dispatch_period_ms == 0 {
            return Err("dispatch_period_ms must be greater than 0".into());
        }
        self.generation_interval.validate("generation_interval")?;
        self.service_time.validate("service_time")?;
        Ok(())
    }

    /// Parse configuration from a JSON string and validate. Missing fields
    /// take their default values.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidConfig`] on parse or validation failure.
    pub fn from_json_str(input: &str) -> Result<Self, DispatchError> {
        let cfg: Self = serde_json::from_str(input)
            .map_err(|e| DispatchError::InvalidConfig(format!("parse error: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Dispatcher cycle period.
    #[must_use]
    pub const fn dispatch_period(&self) -> Duration {
        Duration::from_millis(self.dispatch_period_ms)
    }

    /// Dispatcher send bound.
    #[must_use]
    pub const fn route_timeout(&self) -> Duration {
        Duration::from_millis(self.route_timeout_ms)
    }

    /// Worker backoff after a requeue.
    #[must_use]
    pub const fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }

    /// Status display period.
    #[must_use]
    pub const fn display_period(&self) -> Duration {
        Duration::from_millis(self.display_period_ms)
    }
}

fn bounded(name: &str, value: usize, max: usize) -> Result<(), String> {
    if value == 0 {
        return Err(format!("{name} must be greater than 0"));
    }
    if value > max {
        return Err(format!("{name} must be at most {max}, got {value}"));
    }
    Ok(())
}
